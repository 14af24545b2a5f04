use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, auth::requests::ForgotPasswordRequest};
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::validate_email;

use super::AuthService;

const TEMP_PASSWORD_LENGTH: usize = 12;

/// 忘记密码
///
/// 未注册邮箱明确返回 404（前端以 toast 展示服务端 message），
/// 已注册邮箱重置为临时密码。
// TODO: 接入 SMTP 投递临时密码，当前仅写入审计日志
pub async fn handle_forgot_password(
    service: &AuthService,
    forgot_request: ForgotPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 1. 校验邮箱格式
    if let Err(msg) = validate_email(&forgot_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }

    let storage = service.get_storage(request);

    // 2. 查找账户
    let user = match storage.get_user_by_email(&forgot_request.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccountNotFound,
                "No such account",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password reset failed: {e}"),
                )),
            );
        }
    };

    // 3. 生成临时密码并重置
    let temp_password = generate_random_code(TEMP_PASSWORD_LENGTH);
    let password_hash = match hash_password(&temp_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash temporary password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Password reset failed",
                )),
            );
        }
    };

    match storage.update_password(user.id, &password_hash).await {
        Ok(true) => {
            tracing::info!("Temporary password issued for user {}", user.email);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Password reset successful, check your email for the temporary password",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AccountNotFound,
            "No such account",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Password reset failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::models::courses::entities::{Course, CourseInclude};
    use crate::models::questions::{entities::Question, requests::CreateQuestionRequest};
    use crate::models::schools::entities::School;
    use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
    use crate::models::users::{
        entities::{User, UserInclude, UserWithRelations},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    };
    use crate::storage::Storage;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    // 只实现 get_user_by_email 的测试桩，其余方法不应被触达
    struct EmptyStorage;

    #[async_trait::async_trait]
    impl Storage for EmptyStorage {
        async fn create_school(&self, _id: &str, _name: &str) -> Result<School> {
            unimplemented!()
        }
        async fn get_school_by_id(&self, _id: &str) -> Result<Option<School>> {
            unimplemented!()
        }
        async fn create_user(&self, _user: CreateUserRequest) -> Result<User> {
            unimplemented!()
        }
        async fn get_user_by_id(&self, _id: i64) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn get_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            Ok(None)
        }
        async fn get_user_with_relations(
            &self,
            _id: i64,
            _include: UserInclude,
        ) -> Result<Option<UserWithRelations>> {
            unimplemented!()
        }
        async fn list_users_with_pagination(
            &self,
            _query: UserListQuery,
        ) -> Result<UserListResponse> {
            unimplemented!()
        }
        async fn list_school_users(&self, _school_id: &str) -> Result<Vec<User>> {
            unimplemented!()
        }
        async fn update_user(&self, _id: i64, _update: UpdateUserRequest) -> Result<Option<User>> {
            unimplemented!()
        }
        async fn update_password(&self, _id: i64, _password_hash: &str) -> Result<bool> {
            unimplemented!()
        }
        async fn delete_user(&self, _id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn update_last_login(&self, _id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn count_users(&self) -> Result<u64> {
            unimplemented!()
        }
        async fn create_course(
            &self,
            _id: &str,
            _code: &str,
            _name: &str,
            _creator_id: &str,
            _school_id: &str,
        ) -> Result<Course> {
            unimplemented!()
        }
        async fn get_course_by_id(
            &self,
            _course_id: &str,
            _include: CourseInclude,
        ) -> Result<Option<Course>> {
            unimplemented!()
        }
        async fn list_school_courses(&self, _school_id: &str) -> Result<Vec<Course>> {
            unimplemented!()
        }
        async fn list_user_courses(&self, _user_id: i64) -> Result<Vec<Course>> {
            unimplemented!()
        }
        async fn delete_course(&self, _course_id: &str) -> Result<bool> {
            unimplemented!()
        }
        async fn add_course_member(&self, _course_id: &str, _user_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn remove_course_member(&self, _course_id: &str, _user_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn is_course_member(&self, _course_id: &str, _user_id: i64) -> Result<bool> {
            unimplemented!()
        }
        async fn list_course_members(&self, _course_id: &str) -> Result<Vec<User>> {
            unimplemented!()
        }
        async fn create_question(
            &self,
            _id: &str,
            _course_id: &str,
            _question: CreateQuestionRequest,
        ) -> Result<Question> {
            unimplemented!()
        }
        async fn get_question(
            &self,
            _question_id: &str,
            _course_id: &str,
        ) -> Result<Option<Question>> {
            unimplemented!()
        }
        async fn list_course_questions(&self, _course_id: &str) -> Result<Vec<Question>> {
            unimplemented!()
        }
        async fn create_submission(
            &self,
            _id: &str,
            _user_id: i64,
            _submission: CreateSubmissionRequest,
        ) -> Result<Submission> {
            unimplemented!()
        }
        async fn get_submission_by_id(&self, _submission_id: &str) -> Result<Option<Submission>> {
            unimplemented!()
        }
        async fn list_user_submissions(&self, _user_id: i64) -> Result<Vec<Submission>> {
            unimplemented!()
        }
        async fn list_question_submissions(&self, _question_id: &str) -> Result<Vec<Submission>> {
            unimplemented!()
        }
    }

    #[actix_web::test]
    async fn test_invalid_email_returns_400() {
        let service = AuthService::with_storage(Arc::new(EmptyStorage));
        let request = TestRequest::default().to_http_request();

        let response = handle_forgot_password(
            &service,
            ForgotPasswordRequest {
                email: "not-an-email".to_string(),
            },
            &request,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_account_returns_404_with_message() {
        let service = AuthService::with_storage(Arc::new(EmptyStorage));
        let request = TestRequest::default().to_http_request();

        let response = handle_forgot_password(
            &service,
            ForgotPasswordRequest {
                email: "nobody@test.com".to_string(),
            },
            &request,
        )
        .await
        .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "No such account");
    }
}

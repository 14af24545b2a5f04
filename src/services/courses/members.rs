use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireSession;
use crate::models::courses::entities::CourseInclude;
use crate::models::courses::requests::AddMemberRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

/// 按邮箱添加课程成员（AddMember 对话框）
pub async fn add_member(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    member_data: AddMemberRequest,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if let Err(msg) = validate_email(&member_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }

    let storage = service.get_storage(request);

    // 课程必须存在且在本校
    match storage
        .get_course_by_id(&course_id, CourseInclude::none())
        .await
    {
        Ok(Some(course)) if course.school_id == session_user.school_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to add member: {e}"),
                )),
            );
        }
    }

    // 被添加用户必须存在且在本校
    let user = match storage.get_user_by_email(&member_data.email).await {
        Ok(Some(user)) if user.school_id == session_user.school_id => user,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "No user with this email in your school",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to add member: {e}"),
                )),
            );
        }
    };

    match storage.add_course_member(&course_id, user.id).await {
        Ok(true) => {
            tracing::info!("User {} added to course {}", user.email, course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Member added successfully")))
        }
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::MemberAlreadyExists,
            "User is already a member of this course",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to add member: {e}"),
            )),
        ),
    }
}

/// 移除课程成员
pub async fn remove_member(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    // 课程必须存在且在本校，跨校的复合 ID 按不存在处理
    match storage
        .get_course_by_id(&course_id, CourseInclude::none())
        .await
    {
        Ok(Some(course)) if course.school_id == session_user.school_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to remove member: {e}"),
                )),
            );
        }
    }

    match storage.remove_course_member(&course_id, user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Member removed successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MemberNotFound,
            "User is not a member of this course",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to remove member: {e}"),
            )),
        ),
    }
}

/// 列出课程成员
pub async fn list_members(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    match storage
        .get_course_by_id(&course_id, CourseInclude::none())
        .await
    {
        Ok(Some(course)) if course.school_id == session_user.school_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list members: {e}"),
                )),
            );
        }
    }

    match storage.list_course_members(&course_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            members,
            "Member list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list members: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::models::courses::entities::Course;
    use crate::models::questions::{entities::Question, requests::CreateQuestionRequest};
    use crate::models::schools::entities::School;
    use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
    use crate::models::users::{
        entities::{User, UserInclude, UserRole, UserWithRelations},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    };
    use crate::storage::Storage;
    use actix_web::HttpMessage;
    use actix_web::test::TestRequest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn fixture_user(school_id: &str) -> User {
        User {
            id: 7,
            email: "teacher@test.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Teacher,
            school_id: school_id.to_string(),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    // 课程固定挂在 inst001，成员移除时置位标记
    #[derive(Default)]
    struct MemberStorage {
        removed: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Storage for MemberStorage {
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
            unimplemented!()
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
            course_id: &str,
            _include: CourseInclude,
        ) -> Result<Option<Course>> {
            if course_id != "inst001_CS3213" {
                return Ok(None);
            }
            Ok(Some(Course {
                id: "inst001_CS3213".to_string(),
                code: "CS3213".to_string(),
                name: "Foundations of Software Engineering".to_string(),
                creator_id: "teacher@test.com".to_string(),
                school_id: "inst001".to_string(),
                questions: None,
                members: None,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            }))
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
            self.removed.store(true, Ordering::SeqCst);
            Ok(true)
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
    async fn test_foreign_school_course_membership_is_untouchable() {
        let storage = Arc::new(MemberStorage::default());
        let service = CourseService::with_storage(storage.clone());
        let request = TestRequest::default().to_http_request();
        request
            .extensions_mut()
            .insert(fixture_user("other-school"));

        let response = remove_member(&service, &request, "inst001_CS3213".to_string(), 42)
            .await
            .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
        assert!(!storage.removed.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_same_school_member_removal_succeeds() {
        let storage = Arc::new(MemberStorage::default());
        let service = CourseService::with_storage(storage.clone());
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(fixture_user("inst001"));

        let response = remove_member(&service, &request, "inst001_CS3213".to_string(), 42)
            .await
            .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        assert!(storage.removed.load(Ordering::SeqCst));
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireSession;
use crate::models::courses::entities::CourseInclude;
use crate::models::{ApiResponse, ErrorCode};

/// 获取课程详情
///
/// 成员关联只对可管理成员的角色加载，学生请求时强制关闭该标志。
/// 跨学校的课程对查看者视为不存在。其余字段原样透传。
pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    mut include: CourseInclude,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    include.members = include.members && session_user.role.can_manage_members();

    let storage = service.get_storage(request);

    match storage.get_course_by_id(&course_id, include).await {
        Ok(Some(course)) if course.school_id == session_user.school_id => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(
                course,
                "Course information retrieved successfully",
            ))),
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get course information: {e}"),
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
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;
    use std::sync::Arc;

    fn fixture_course() -> Course {
        Course {
            id: "inst001_CS3213".to_string(),
            code: "CS3213".to_string(),
            name: "Foundations of Software Engineering".to_string(),
            creator_id: "teacher@test.com".to_string(),
            school_id: "inst001".to_string(),
            questions: Some(vec![]),
            members: Some(vec![]),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn fixture_user(role: UserRole) -> User {
        User {
            id: 7,
            email: "teacher@test.com".to_string(),
            password_hash: String::new(),
            role,
            school_id: "inst001".to_string(),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    // 只实现 get_course_by_id 的测试桩
    struct CourseStorage;

    #[async_trait::async_trait]
    impl Storage for CourseStorage {
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
            include: CourseInclude,
        ) -> Result<Option<Course>> {
            if course_id != "inst001_CS3213" {
                return Ok(None);
            }
            let mut course = fixture_course();
            if !include.questions {
                course.questions = None;
            }
            if !include.members {
                course.members = None;
            }
            Ok(Some(course))
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
    async fn test_course_fields_pass_through_unchanged() {
        let service = CourseService::with_storage(Arc::new(CourseStorage));
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(fixture_user(UserRole::Teacher));

        let response = get_course(
            &service,
            &request,
            "inst001_CS3213".to_string(),
            CourseInclude::default(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let data = &json["data"];

        assert_eq!(data["id"], "inst001_CS3213");
        assert_eq!(data["code"], "CS3213");
        assert_eq!(data["name"], "Foundations of Software Engineering");
        assert_eq!(data["creator_id"], "teacher@test.com");
        assert_eq!(data["school_id"], "inst001");
        assert_eq!(data["questions"], serde_json::json!([]));
        assert_eq!(data["members"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_student_request_never_loads_members() {
        let service = CourseService::with_storage(Arc::new(CourseStorage));
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(fixture_user(UserRole::Student));

        let response = get_course(
            &service,
            &request,
            "inst001_CS3213".to_string(),
            CourseInclude::default(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert!(json["data"].get("members").is_none());
        assert_eq!(json["data"]["questions"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_missing_course_returns_404() {
        let service = CourseService::with_storage(Arc::new(CourseStorage));
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(fixture_user(UserRole::Teacher));

        let response = get_course(
            &service,
            &request,
            "inst001_NOPE42".to_string(),
            CourseInclude::default(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}

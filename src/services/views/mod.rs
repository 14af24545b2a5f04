//! 页面视图组装服务
//!
//! 对应 SPA 的页面级数据接口：按会话用户组装视图模型。
//! 取数为空时返回 303 重定向，由前端路由跟随跳转：
//! 未登录回首页，课程缺失回课程列表页，题目或提交缺失回课程详情页。

pub mod course_view;
pub mod submission_view;
pub mod user_management;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct ViewService {
    storage: Option<Arc<dyn Storage>>,
}

impl ViewService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    /// 注入存储实例，测试用
    #[allow(dead_code)]
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 课程详情页
    pub async fn course_view(
        &self,
        request: &HttpRequest,
        course_code: String,
    ) -> ActixResult<HttpResponse> {
        course_view::course_view(self, request, course_code).await
    }

    // 提交查看页
    pub async fn submission_view(
        &self,
        request: &HttpRequest,
        course_code: String,
        question_id: String,
        submission_id: String,
    ) -> ActixResult<HttpResponse> {
        submission_view::submission_view(self, request, course_code, question_id, submission_id)
            .await
    }

    // 用户管理页
    pub async fn user_management(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        user_management::user_management(self, request).await
    }
}

/// 303 重定向响应，SPA 路由跟随 Location 跳转
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
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
        entities::{User, UserInclude, UserRole, UserWithRelations},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    };
    use actix_web::HttpMessage;
    use actix_web::body::to_bytes;
    use actix_web::http::{StatusCode, header};
    use actix_web::test::TestRequest;

    fn fixture_user(role: UserRole) -> User {
        User {
            id: 7,
            email: "viewer@test.com".to_string(),
            password_hash: String::new(),
            role,
            school_id: "inst001".to_string(),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    // 课程与提交一律缺失，题目只有 q-exists 存在
    struct MissingEntityStorage;

    #[async_trait::async_trait]
    impl Storage for MissingEntityStorage {
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
            _course_id: &str,
            _include: CourseInclude,
        ) -> Result<Option<Course>> {
            Ok(None)
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
            question_id: &str,
            course_id: &str,
        ) -> Result<Option<Question>> {
            if question_id != "q-exists" {
                return Ok(None);
            }
            Ok(Some(Question {
                id: "q-exists".to_string(),
                title: "Two Sum".to_string(),
                language: "python".to_string(),
                course_id: course_id.to_string(),
                created_at: chrono::Utc::now(),
            }))
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
            Ok(None)
        }
        async fn list_user_submissions(&self, _user_id: i64) -> Result<Vec<Submission>> {
            unimplemented!()
        }
        async fn list_question_submissions(&self, _question_id: &str) -> Result<Vec<Submission>> {
            unimplemented!()
        }
    }

    fn fixture_service() -> ViewService {
        ViewService::with_storage(Arc::new(MissingEntityStorage))
    }

    fn location_of(response: &HttpResponse) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .expect("missing Location header")
            .to_str()
            .unwrap()
            .to_string()
    }

    async fn assert_empty_body(response: HttpResponse) {
        let body = to_bytes(response.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_unauthenticated_course_view_redirects_home() {
        let service = fixture_service();
        let request = TestRequest::default().to_http_request();

        let response = service
            .course_view(&request, "CS3213".to_string())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/");
        assert_empty_body(response).await;
    }

    #[actix_web::test]
    async fn test_missing_course_redirects_to_course_list() {
        let service = fixture_service();
        let request = TestRequest::default().to_http_request();
        request
            .extensions_mut()
            .insert(fixture_user(UserRole::Teacher));

        let response = service
            .course_view(&request, "CS3213".to_string())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/courses");
        assert_empty_body(response).await;
    }

    #[actix_web::test]
    async fn test_missing_question_redirects_to_course_page() {
        let service = fixture_service();
        let request = TestRequest::default().to_http_request();
        request
            .extensions_mut()
            .insert(fixture_user(UserRole::Student));

        let response = service
            .submission_view(
                &request,
                "CS3213".to_string(),
                "q-missing".to_string(),
                "s-1".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/courses/CS3213");
        assert_empty_body(response).await;
    }

    #[actix_web::test]
    async fn test_missing_submission_redirects_to_course_page() {
        let service = fixture_service();
        let request = TestRequest::default().to_http_request();
        request
            .extensions_mut()
            .insert(fixture_user(UserRole::Teacher));

        let response = service
            .submission_view(
                &request,
                "CS3213".to_string(),
                "q-exists".to_string(),
                "s-missing".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/courses/CS3213");
        assert_empty_body(response).await;
    }

    #[actix_web::test]
    async fn test_non_admin_user_management_redirects_home() {
        let service = fixture_service();
        let request = TestRequest::default().to_http_request();
        request
            .extensions_mut()
            .insert(fixture_user(UserRole::Teacher));

        let response = service.user_management(&request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/");
        assert_empty_body(response).await;
    }

    #[actix_web::test]
    async fn test_unauthenticated_user_management_redirects_home() {
        let service = fixture_service();
        let request = TestRequest::default().to_http_request();

        let response = service.user_management(&request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/");
        assert_empty_body(response).await;
    }
}

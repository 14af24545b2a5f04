pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod members;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::entities::CourseInclude;
use crate::models::courses::requests::{AddMemberRequest, CreateCourseRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 获取课程详情
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: String,
        include: CourseInclude,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id, include).await
    }

    // 列出当前用户可见的课程
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_courses(self, request).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 添加课程成员
    pub async fn add_member(
        &self,
        request: &HttpRequest,
        course_id: String,
        member_data: AddMemberRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_member(self, request, course_id, member_data).await
    }

    // 移除课程成员
    pub async fn remove_member(
        &self,
        request: &HttpRequest,
        course_id: String,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::remove_member(self, request, course_id, user_id).await
    }

    // 列出课程成员
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, request, course_id).await
    }
}

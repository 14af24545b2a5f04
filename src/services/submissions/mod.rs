pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 创建提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        course_id: String,
        submission_data: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, course_id, submission_data).await
    }

    // 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_submission(self, request, submission_id).await
    }

    // 列出当前用户的提交
    pub async fn list_my_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_submissions(self, request).await
    }

    // 按题目列出提交
    pub async fn list_question_submissions(
        &self,
        request: &HttpRequest,
        course_id: String,
        question_id: String,
    ) -> ActixResult<HttpResponse> {
        list::list_question_submissions(self, request, course_id, question_id).await
    }
}

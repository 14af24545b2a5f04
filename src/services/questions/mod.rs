pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::CreateQuestionRequest;
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
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

    // 在课程下创建题目
    pub async fn create_question(
        &self,
        request: &HttpRequest,
        course_id: String,
        question_data: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(self, request, course_id, question_data).await
    }

    // 获取题目详情（按课程范围）
    pub async fn get_question(
        &self,
        request: &HttpRequest,
        course_id: String,
        question_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_question(self, request, course_id, question_id).await
    }

    // 列出课程题目
    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        course_id: String,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, course_id).await
    }
}

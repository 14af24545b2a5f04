use serde::Deserialize;
use ts_rs::TS;

// 创建题目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub language: String,
}

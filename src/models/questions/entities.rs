use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: String,
    pub title: String,
    // 代码查看器使用的语言标签，如 "python"、"java"
    pub language: String,
    pub course_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

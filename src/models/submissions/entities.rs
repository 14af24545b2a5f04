use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交实体
//
// submitted_program 为程序文本的存储地址；文本本身在提交查看页
// 按需抓取，不落库。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: String,
    pub question_id: String,
    pub user_id: i64,
    pub submitted_program: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

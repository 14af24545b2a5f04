use serde::Deserialize;
use ts_rs::TS;

// 创建提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub question_id: String,
    pub submitted_program: String,
}

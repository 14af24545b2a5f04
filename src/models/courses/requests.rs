use serde::Deserialize;
use ts_rs::TS;

// 创建课程请求
//
// 课程 ID 由服务层从会话用户的学校与课程代码组合，客户端不提供。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
}

// 添加课程成员请求（AddMember 对话框）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AddMemberRequest {
    pub email: String,
}

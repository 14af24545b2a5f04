pub mod auth;
pub mod common;
pub mod courses;
pub mod questions;
pub mod schools;
pub mod submissions;
pub mod users;
pub mod views;

pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 应用启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// code 为 0 表示成功，1xxx 为通用错误，2xxx 用户，3xxx 学校，
/// 4xxx 课程，5xxx 题目，6xxx 提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    InternalServerError = 1000,
    InvalidParams = 1001,
    Unauthorized = 1002,
    AccessDenied = 1003,

    UserNotFound = 2001,
    UserEmailAlreadyExists = 2002,
    UserCreateFailed = 2003,
    UserUpdateFailed = 2004,
    AuthFailed = 2005,
    AccountNotFound = 2006,

    SchoolNotFound = 3001,

    CourseNotFound = 4001,
    CourseAlreadyExists = 4002,
    MemberAlreadyExists = 4003,
    MemberNotFound = 4004,

    QuestionNotFound = 5001,

    SubmissionNotFound = 6001,
    ContentFetchFailed = 6002,
}

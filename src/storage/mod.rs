use std::sync::Arc;

use crate::models::{
    courses::entities::{Course, CourseInclude},
    questions::{entities::Question, requests::CreateQuestionRequest},
    schools::entities::School,
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{
        entities::{User, UserInclude, UserWithRelations},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学校管理方法
    // 创建学校
    async fn create_school(&self, id: &str, name: &str) -> Result<School>;
    // 通过ID获取学校信息
    async fn get_school_by_id(&self, id: &str) -> Result<Option<School>>;

    /// 用户管理方法
    // 创建用户（password 字段应已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 获取用户及其关联实体（按 include 标志加载）
    async fn get_user_with_relations(
        &self,
        id: i64,
        include: UserInclude,
    ) -> Result<Option<UserWithRelations>>;
    // 分页列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 列出某学校全部用户
    async fn list_school_users(&self, school_id: &str) -> Result<Vec<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户密码哈希
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程（ID 由服务层组合为 {school_id}_{code}）
    async fn create_course(
        &self,
        id: &str,
        code: &str,
        name: &str,
        creator_id: &str,
        school_id: &str,
    ) -> Result<Course>;
    // 通过ID获取课程信息，按 include 标志加载题目/成员
    async fn get_course_by_id(
        &self,
        course_id: &str,
        include: CourseInclude,
    ) -> Result<Option<Course>>;
    // 列出某学校全部课程
    async fn list_school_courses(&self, school_id: &str) -> Result<Vec<Course>>;
    // 列出某用户加入的课程
    async fn list_user_courses(&self, user_id: i64) -> Result<Vec<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: &str) -> Result<bool>;

    /// 课程成员管理方法
    // 添加课程成员，已存在时返回 false
    async fn add_course_member(&self, course_id: &str, user_id: i64) -> Result<bool>;
    // 移除课程成员
    async fn remove_course_member(&self, course_id: &str, user_id: i64) -> Result<bool>;
    // 判断用户是否为课程成员
    async fn is_course_member(&self, course_id: &str, user_id: i64) -> Result<bool>;
    // 列出课程成员
    async fn list_course_members(&self, course_id: &str) -> Result<Vec<User>>;

    /// 题目管理方法
    // 创建题目
    async fn create_question(
        &self,
        id: &str,
        course_id: &str,
        question: CreateQuestionRequest,
    ) -> Result<Question>;
    // 获取题目，按课程范围查询（跨课程的 ID 视为不存在）
    async fn get_question(&self, question_id: &str, course_id: &str) -> Result<Option<Question>>;
    // 列出课程全部题目
    async fn list_course_questions(&self, course_id: &str) -> Result<Vec<Question>>;

    /// 提交管理方法
    // 创建提交
    async fn create_submission(
        &self,
        id: &str,
        user_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: &str) -> Result<Option<Submission>>;
    // 列出某用户的全部提交
    async fn list_user_submissions(&self, user_id: i64) -> Result<Vec<Submission>>;
    // 列出某题目的全部提交
    async fn list_question_submissions(&self, question_id: &str) -> Result<Vec<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

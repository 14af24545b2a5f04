//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod questions;
mod schools;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学校模块
    async fn create_school(&self, id: &str, name: &str) -> Result<School> {
        self.create_school_impl(id, name).await
    }

    async fn get_school_by_id(&self, id: &str) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_with_relations(
        &self,
        id: i64,
        include: UserInclude,
    ) -> Result<Option<UserWithRelations>> {
        self.get_user_with_relations_impl(id, include).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_school_users(&self, school_id: &str) -> Result<Vec<User>> {
        self.list_school_users_impl(school_id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(
        &self,
        id: &str,
        code: &str,
        name: &str,
        creator_id: &str,
        school_id: &str,
    ) -> Result<Course> {
        self.create_course_impl(id, code, name, creator_id, school_id)
            .await
    }

    async fn get_course_by_id(
        &self,
        course_id: &str,
        include: CourseInclude,
    ) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id, include).await
    }

    async fn list_school_courses(&self, school_id: &str) -> Result<Vec<Course>> {
        self.list_school_courses_impl(school_id).await
    }

    async fn list_user_courses(&self, user_id: i64) -> Result<Vec<Course>> {
        self.list_user_courses_impl(user_id).await
    }

    async fn delete_course(&self, course_id: &str) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 课程成员模块
    async fn add_course_member(&self, course_id: &str, user_id: i64) -> Result<bool> {
        self.add_course_member_impl(course_id, user_id).await
    }

    async fn remove_course_member(&self, course_id: &str, user_id: i64) -> Result<bool> {
        self.remove_course_member_impl(course_id, user_id).await
    }

    async fn is_course_member(&self, course_id: &str, user_id: i64) -> Result<bool> {
        self.is_course_member_impl(course_id, user_id).await
    }

    async fn list_course_members(&self, course_id: &str) -> Result<Vec<User>> {
        self.list_course_members_impl(course_id).await
    }

    // 题目模块
    async fn create_question(
        &self,
        id: &str,
        course_id: &str,
        question: CreateQuestionRequest,
    ) -> Result<Question> {
        self.create_question_impl(id, course_id, question).await
    }

    async fn get_question(&self, question_id: &str, course_id: &str) -> Result<Option<Question>> {
        self.get_question_impl(question_id, course_id).await
    }

    async fn list_course_questions(&self, course_id: &str) -> Result<Vec<Question>> {
        self.list_course_questions_impl(course_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        id: &str,
        user_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(id, user_id, submission).await
    }

    async fn get_submission_by_id(&self, submission_id: &str) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_user_submissions(&self, user_id: i64) -> Result<Vec<Submission>> {
        self.list_user_submissions_impl(user_id).await
    }

    async fn list_question_submissions(&self, question_id: &str) -> Result<Vec<Submission>> {
        self.list_question_submissions_impl(question_id).await
    }
}

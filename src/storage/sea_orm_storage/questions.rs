use super::SeaOrmStorage;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{CourseHubError, Result};
use crate::models::questions::{entities::Question, requests::CreateQuestionRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(
        &self,
        id: &str,
        course_id: &str,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id.to_string()),
            title: Set(req.title),
            language: Set(req.language),
            course_id: Set(course_id.to_string()),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 获取题目，按课程范围查询
    ///
    /// 课程不匹配的题目视为不存在，避免跨课程读取。
    pub async fn get_question_impl(
        &self,
        question_id: &str,
        course_id: &str,
    ) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 列出课程全部题目
    pub async fn list_course_questions_impl(&self, course_id: &str) -> Result<Vec<Question>> {
        let questions = Questions::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程题目失败: {e}")))?;

        Ok(questions.into_iter().map(|m| m.into_question()).collect())
    }
}

use super::SeaOrmStorage;
use crate::entity::course_members;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::users;
use crate::errors::{CourseHubError, Result};
use crate::models::courses::entities::{Course, CourseInclude};
use crate::models::users::entities::User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        id: &str,
        code: &str,
        name: &str,
        creator_id: &str,
        school_id: &str,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id.to_string()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            creator_id: Set(creator_id.to_string()),
            school_id: Set(school_id.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    ///
    /// 按 include 标志加载题目与成员；未请求的关联保持 None，
    /// 请求到的空集合返回 Some(vec![])。其余字段原样透传。
    pub async fn get_course_by_id_impl(
        &self,
        course_id: &str,
        include: CourseInclude,
    ) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut course = model.into_course();

        if include.questions {
            course.questions = Some(self.list_course_questions_impl(course_id).await?);
        }

        if include.members {
            course.members = Some(self.list_course_members_impl(course_id).await?);
        }

        Ok(Some(course))
    }

    /// 列出某学校全部课程
    pub async fn list_school_courses_impl(&self, school_id: &str) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询学校课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出某用户加入的课程
    pub async fn list_user_courses_impl(&self, user_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::courses::Relation::CourseMembers.def(),
            )
            .filter(course_members::Column::UserId.eq(user_id))
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: &str) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 添加课程成员，已存在时返回 false
    pub async fn add_course_member_impl(&self, course_id: &str, user_id: i64) -> Result<bool> {
        if self.is_course_member_impl(course_id, user_id).await? {
            return Ok(false);
        }

        let now = chrono::Utc::now().timestamp();

        let model = course_members::ActiveModel {
            course_id: Set(course_id.to_string()),
            user_id: Set(user_id),
            joined_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("添加课程成员失败: {e}")))?;

        Ok(true)
    }

    /// 移除课程成员
    pub async fn remove_course_member_impl(&self, course_id: &str, user_id: i64) -> Result<bool> {
        let result = course_members::Entity::delete_many()
            .filter(course_members::Column::CourseId.eq(course_id))
            .filter(course_members::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("移除课程成员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 判断用户是否为课程成员
    pub async fn is_course_member_impl(&self, course_id: &str, user_id: i64) -> Result<bool> {
        let count = course_members::Entity::find()
            .filter(course_members::Column::CourseId.eq(course_id))
            .filter(course_members::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程成员失败: {e}")))?;

        Ok(count > 0)
    }

    /// 列出课程成员
    pub async fn list_course_members_impl(&self, course_id: &str) -> Result<Vec<User>> {
        let members = users::Entity::find()
            .join(
                JoinType::InnerJoin,
                users::Relation::CourseMembers.def(),
            )
            .filter(course_members::Column::CourseId.eq(course_id))
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程成员失败: {e}")))?;

        Ok(members.into_iter().map(|m| m.into_user()).collect())
    }
}

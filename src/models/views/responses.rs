//! 页面视图模型
//!
//! 服务端组装的页面数据：取数成功返回视图模型，取数为空由路由层重定向。
//! 受限的分支（People 标签）按查看者角色在组装时裁剪。

use serde::Serialize;
use ts_rs::TS;

use crate::models::courses::entities::Course;
use crate::models::questions::entities::Question;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{User, UserRole};

// 课程页可见标签
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/views.ts")]
pub enum CourseTab {
    Home,
    Questions,
    People,
}

// 课程成员行（People 标签中的 "email [ROLE]" 列表项）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/views.ts")]
pub struct MemberEntry {
    pub email: String,
    pub role: UserRole,
}

// People 标签内容，仅教师可见
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/views.ts")]
pub struct PeopleTab {
    pub members: Vec<MemberEntry>,
    pub can_add_members: bool,
}

// 课程详情页视图模型
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/views.ts")]
pub struct CourseViewModel {
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub tabs: Vec<CourseTab>,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleTab>,
}

impl CourseViewModel {
    /// 按查看者角色组装课程页
    ///
    /// 非教师角色不渲染 People 标签；course.members 对这类查看者本就
    /// 不应加载（服务层不请求该关联）。
    pub fn build(course: Course, viewer_role: &UserRole) -> Self {
        let mut tabs = vec![CourseTab::Home, CourseTab::Questions];
        let people = match viewer_role {
            UserRole::Teacher | UserRole::Admin => {
                tabs.push(CourseTab::People);
                Some(PeopleTab {
                    members: course
                        .members
                        .unwrap_or_default()
                        .into_iter()
                        .map(|m| MemberEntry {
                            email: m.email,
                            role: m.role,
                        })
                        .collect(),
                    can_add_members: true,
                })
            }
            UserRole::Student => None,
        };

        Self {
            course_id: course.id,
            course_code: course.code,
            course_name: course.name,
            tabs,
            questions: course.questions.unwrap_or_default(),
            people,
        }
    }
}

// 提交查看页视图模型
//
// code 为已抓取的程序文本；查看器只读，不支持编辑、持久化或 diff。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/views.ts")]
pub struct SubmissionViewModel {
    pub code: String,
    pub language: String,
    pub read_only: bool,
    pub submission: Submission,
    pub question: Question,
}

impl SubmissionViewModel {
    pub fn new(code: String, question: Question, submission: Submission) -> Self {
        Self {
            code,
            language: question.language.clone(),
            read_only: true,
            submission,
            question,
        }
    }
}

// 用户管理页视图模型
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/views.ts")]
pub struct UserManagementViewModel {
    pub school_name: String,
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::Course;

    fn test_course(members: Option<Vec<User>>) -> Course {
        Course {
            id: "inst001_CS3213".to_string(),
            code: "CS3213".to_string(),
            name: "Foundations of Software Engineering".to_string(),
            creator_id: "teacher@test.com".to_string(),
            school_id: "inst001".to_string(),
            questions: Some(vec![]),
            members,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn test_user(email: &str, role: UserRole) -> User {
        User {
            id: 1,
            email: email.to_string(),
            password_hash: String::new(),
            role,
            school_id: "inst001".to_string(),
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_student_view_has_no_people_tab() {
        let view = CourseViewModel::build(test_course(None), &UserRole::Student);
        assert!(view.people.is_none());
        assert!(!view.tabs.contains(&CourseTab::People));

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("people").is_none());
    }

    #[test]
    fn test_teacher_view_lists_members() {
        let members = vec![
            test_user("teacher@test.com", UserRole::Teacher),
            test_user("student@test.com", UserRole::Student),
        ];
        let view = CourseViewModel::build(test_course(Some(members)), &UserRole::Teacher);

        assert!(view.tabs.contains(&CourseTab::People));
        let people = view.people.expect("people tab missing for teacher");
        assert!(people.can_add_members);
        assert_eq!(people.members.len(), 2);
        assert_eq!(people.members[1].email, "student@test.com");
    }

    #[test]
    fn test_submission_view_is_read_only() {
        let question = Question {
            id: "q1".to_string(),
            title: "Two Sum".to_string(),
            language: "python".to_string(),
            course_id: "inst001_CS3213".to_string(),
            created_at: chrono::Utc::now(),
        };
        let submission = Submission {
            id: "s1".to_string(),
            question_id: "q1".to_string(),
            user_id: 1,
            submitted_program: "https://store.test/s1.py".to_string(),
            submitted_at: chrono::Utc::now(),
        };

        let view = SubmissionViewModel::new("print('hi')".to_string(), question, submission);
        assert!(view.read_only);
        assert_eq!(view.language, "python");
        assert_eq!(view.code, "print('hi')");
    }
}

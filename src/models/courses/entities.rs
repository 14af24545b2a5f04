use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::questions::entities::Question;
use crate::models::users::entities::User;

// 课程实体
//
// questions 和 members 按 include 标志填充：未请求时为 None（不序列化），
// 请求到的空集合序列化为 []。存储层返回的字段原样透传，不做任何变换。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub creator_id: String,
    pub school_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<User>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 组合课程主键：`{school_id}_{code}`
    ///
    /// 课程代码须由调用方（路径提取器）预先大写规范化。
    pub fn compose_id(school_id: &str, code: &str) -> String {
        format!("{school_id}_{code}")
    }
}

// 关联实体 include 标志
//
// 默认与课程详情页一致：题目与成员都加载。
#[derive(Debug, Clone, Copy, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseInclude {
    #[serde(default = "default_true")]
    pub questions: bool,
    #[serde(default = "default_true")]
    pub members: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CourseInclude {
    fn default() -> Self {
        Self {
            questions: true,
            members: true,
        }
    }
}

impl CourseInclude {
    /// 不加载任何关联
    pub fn none() -> Self {
        Self {
            questions: false,
            members: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_id() {
        assert_eq!(Course::compose_id("inst001", "CS3213"), "inst001_CS3213");
        assert_eq!(Course::compose_id("inst002", "MA1521"), "inst002_MA1521");
    }

    #[test]
    fn test_include_defaults_on() {
        let include = CourseInclude::default();
        assert!(include.questions);
        assert!(include.members);
    }

    #[test]
    fn test_included_empty_relations_serialize_as_arrays() {
        let course = Course {
            id: "inst001_CS3213".to_string(),
            code: "CS3213".to_string(),
            name: "Foundations of Software Engineering".to_string(),
            creator_id: "teacher@test.com".to_string(),
            school_id: "inst001".to_string(),
            questions: Some(vec![]),
            members: Some(vec![]),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["id"], "inst001_CS3213");
        assert_eq!(json["code"], "CS3213");
        assert_eq!(json["name"], "Foundations of Software Engineering");
        assert_eq!(json["creator_id"], "teacher@test.com");
        assert_eq!(json["school_id"], "inst001");
        assert_eq!(json["questions"], serde_json::json!([]));
        assert_eq!(json["members"], serde_json::json!([]));
    }

    #[test]
    fn test_omitted_relations_are_absent() {
        let course = Course {
            id: "inst001_CS3213".to_string(),
            code: "CS3213".to_string(),
            name: "Foundations of Software Engineering".to_string(),
            creator_id: "teacher@test.com".to_string(),
            school_id: "inst001".to_string(),
            questions: None,
            members: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&course).unwrap();
        assert!(json.get("questions").is_none());
        assert!(json.get("members").is_none());
    }
}

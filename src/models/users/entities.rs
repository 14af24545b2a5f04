use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
//
// 封闭枚举：每个判定点都应穷尽匹配，不允许散落的字符串比较。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Student, // 学生
    Teacher, // 教师
    Admin,   // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "STUDENT";
    pub const TEACHER: &'static str = "TEACHER";
    pub const ADMIN: &'static str = "ADMIN";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Teacher]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Teacher, &Self::Admin]
    }

    /// 是否允许查看课程成员（People 标签）
    pub fn can_manage_members(&self) -> bool {
        match self {
            UserRole::Teacher | UserRole::Admin => true,
            UserRole::Student => false,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: STUDENT, TEACHER, ADMIN"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(UserRole::Student),
            "TEACHER" => Ok(UserRole::Teacher),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub school_id: String,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &self.role.to_string())
            .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

// 关联实体 include 标志
//
// 显式的布尔字段配置，而不是动态的 options 包；
// 每个字段对应返回结果上的一个 Option 关联。
#[derive(Debug, Clone, Copy, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserInclude {
    #[serde(default)]
    pub school: bool,
    #[serde(default)]
    pub courses: bool,
    #[serde(default)]
    pub submissions: bool,
}

// 带关联的用户视图
//
// 未请求的关联保持 None 并跳过序列化；请求到的空集合序列化为 []。
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserWithRelations {
    #[serde(flatten)]
    #[ts(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<crate::models::schools::entities::School>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<crate::models::courses::entities::Course>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<crate::models::submissions::entities::Submission>>,
}

impl UserWithRelations {
    /// 不携带任何关联的裸用户
    pub fn bare(user: User) -> Self {
        Self {
            user,
            school: None,
            courses: None,
            submissions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for (s, role) in [
            ("STUDENT", UserRole::Student),
            ("TEACHER", UserRole::Teacher),
            ("ADMIN", UserRole::Admin),
        ] {
            assert_eq!(UserRole::from_str(s).unwrap(), role);
            assert_eq!(role.to_string(), s);
        }
        assert!(UserRole::from_str("teacher").is_err());
    }

    #[test]
    fn test_member_visibility_by_role() {
        assert!(UserRole::Teacher.can_manage_members());
        assert!(UserRole::Admin.can_manage_members());
        assert!(!UserRole::Student.can_manage_members());
    }

    #[test]
    fn test_include_defaults_off() {
        let include = UserInclude::default();
        assert!(!include.school);
        assert!(!include.courses);
        assert!(!include.submissions);
    }
}

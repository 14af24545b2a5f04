//! 请求参数校验工具

use once_cell::sync::Lazy;
use regex::Regex;

// 邮箱格式：本地部分 @ 域名部分，域名至少含一个点
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("invalid email regex")
});

// 课程代码：字母数字，2-16 位（存储时统一大写）
static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{2,16}$").expect("invalid course code regex"));

// 学校 ID：小写字母数字与连字符，2-32 位
static SCHOOL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]{2,32}$").expect("invalid school id regex"));

/// 校验邮箱格式
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 254 {
        return Err("Email is too long".to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// 校验密码强度
///
/// 至少 8 位，必须同时包含字母和数字。
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password is too long".to_string());
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err("Password must contain both letters and digits".to_string());
    }
    Ok(())
}

/// 校验课程代码格式
pub fn validate_course_code(code: &str) -> Result<(), String> {
    if !COURSE_CODE_RE.is_match(code) {
        return Err("Course code must be 2-16 alphanumeric characters".to_string());
    }
    Ok(())
}

/// 校验学校 ID 格式
pub fn validate_school_id(school_id: &str) -> Result<(), String> {
    if !SCHOOL_ID_RE.is_match(school_id) {
        return Err("School id must be 2-32 lowercase alphanumeric characters".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("teacher@test.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("passw0rd").is_ok());
        assert!(validate_password("A1b2c3d4e5").is_ok());

        assert!(validate_password("short1").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_validate_course_code() {
        assert!(validate_course_code("CS3213").is_ok());
        assert!(validate_course_code("cs3213").is_ok());

        assert!(validate_course_code("C").is_err());
        assert!(validate_course_code("CS 3213").is_err());
        assert!(validate_course_code("CS3213_EXTRA_LONG_CODE").is_err());
    }

    #[test]
    fn test_validate_school_id() {
        assert!(validate_school_id("inst001").is_ok());
        assert!(validate_school_id("nus-soc").is_ok());

        assert!(validate_school_id("INST001").is_err());
        assert!(validate_school_id("i").is_err());
    }
}

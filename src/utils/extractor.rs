//! 路径参数的安全提取器
//!
//! 在进入服务层之前完成格式校验与规范化，非法参数直接返回 400。
//! 课程代码在提取时统一转为大写，与存储格式保持一致。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, err, ok};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_course_code;

// 资源 ID（UUID 等）：字母数字与连字符，1-64 位
static RESOURCE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,64}$").expect("invalid resource id regex"));

// 课程完整 ID：{school_id}_{CODE}
static COURSE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]{2,32}_[A-Za-z0-9]{2,16}$").expect("invalid course id regex"));

fn invalid_param(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidParams,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}

fn path_param(req: &HttpRequest, name: &str) -> Result<String, actix_web::Error> {
    req.match_info()
        .get(name)
        .map(|v| v.to_string())
        .ok_or_else(|| invalid_param(format!("Missing path parameter: {name}")))
}

/// 课程代码提取器，统一转为大写
#[derive(Debug, Clone)]
pub struct SafeCourseCode(pub String);

impl FromRequest for SafeCourseCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = match path_param(req, "course_code") {
            Ok(v) => v,
            Err(e) => return err(e),
        };
        match validate_course_code(&raw) {
            Ok(()) => ok(SafeCourseCode(raw.to_uppercase())),
            Err(msg) => err(invalid_param(msg)),
        }
    }
}

/// 课程完整 ID 提取器（{school_id}_{code}），代码部分转为大写
#[derive(Debug, Clone)]
pub struct SafeCourseId(pub String);

impl FromRequest for SafeCourseId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = match path_param(req, "course_id") {
            Ok(v) => v,
            Err(e) => return err(e),
        };
        if !COURSE_ID_RE.is_match(&raw) {
            return err(invalid_param("Invalid course id format".to_string()));
        }
        // 仅代码段大写，学校段保持原样
        let normalized = match raw.rsplit_once('_') {
            Some((school, code)) => format!("{school}_{}", code.to_uppercase()),
            None => raw,
        };
        ok(SafeCourseId(normalized))
    }
}

/// 题目 ID 提取器
#[derive(Debug, Clone)]
pub struct SafeQuestionId(pub String);

impl FromRequest for SafeQuestionId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = match path_param(req, "question_id") {
            Ok(v) => v,
            Err(e) => return err(e),
        };
        if RESOURCE_ID_RE.is_match(&raw) {
            ok(SafeQuestionId(raw))
        } else {
            err(invalid_param("Invalid question id format".to_string()))
        }
    }
}

/// 提交 ID 提取器
#[derive(Debug, Clone)]
pub struct SafeSubmissionId(pub String);

impl FromRequest for SafeSubmissionId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = match path_param(req, "submission_id") {
            Ok(v) => v,
            Err(e) => return err(e),
        };
        if RESOURCE_ID_RE.is_match(&raw) {
            ok(SafeSubmissionId(raw))
        } else {
            err(invalid_param("Invalid submission id format".to_string()))
        }
    }
}

/// 用户 ID 提取器（i64）
#[derive(Debug, Clone, Copy)]
pub struct SafeUserIdI64(pub i64);

impl FromRequest for SafeUserIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = match path_param(req, "user_id") {
            Ok(v) => v,
            Err(e) => return err(e),
        };
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => ok(SafeUserIdI64(id)),
            _ => err(invalid_param("Invalid user id format".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_id_pattern() {
        assert!(COURSE_ID_RE.is_match("inst001_CS3213"));
        assert!(COURSE_ID_RE.is_match("nus-soc_cs3213"));

        assert!(!COURSE_ID_RE.is_match("CS3213"));
        assert!(!COURSE_ID_RE.is_match("inst001_"));
        assert!(!COURSE_ID_RE.is_match("inst001_CS 3213"));
    }

    #[test]
    fn test_resource_id_pattern() {
        assert!(RESOURCE_ID_RE.is_match("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!RESOURCE_ID_RE.is_match(""));
        assert!(!RESOURCE_ID_RE.is_match("id with spaces"));
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireSession;
use crate::models::courses::entities::{Course, CourseInclude};
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_course_code;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 1. 课程代码校验并规范化为大写
    if let Err(msg) = validate_course_code(&course_data.code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }
    let code = course_data.code.to_uppercase();

    if course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Course name cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    // 2. 课程 ID 由会话用户的学校与课程代码组合
    let course_id = Course::compose_id(&session_user.school_id, &code);

    match storage
        .get_course_by_id(&course_id, CourseInclude::none())
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                "A course with this code already exists in your school",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create course: {e}"),
                )),
            );
        }
    }

    // 3. 创建课程，创建者邮箱记为 creator_id
    match storage
        .create_course(
            &course_id,
            &code,
            course_data.name.trim(),
            &session_user.email,
            &session_user.school_id,
        )
        .await
    {
        Ok(course) => {
            // 创建者自动成为课程成员
            if let Err(e) = storage.add_course_member(&course_id, session_user.id).await {
                tracing::warn!("Failed to enroll course creator: {}", e);
            }

            tracing::info!("Course {} created by {}", course.id, session_user.email);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create course: {e}"),
            )),
        ),
    }
}

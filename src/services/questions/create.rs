use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::middlewares::RequireSession;
use crate::models::courses::entities::CourseInclude;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_question(
    service: &QuestionService,
    request: &HttpRequest,
    course_id: String,
    question_data: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if question_data.title.trim().is_empty() || question_data.language.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Question title and language cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    // 课程必须存在且在本校
    match storage
        .get_course_by_id(&course_id, CourseInclude::none())
        .await
    {
        Ok(Some(course)) if course.school_id == session_user.school_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create question: {e}"),
                )),
            );
        }
    }

    let question_id = uuid::Uuid::new_v4().to_string();

    match storage
        .create_question(&question_id, &course_id, question_data)
        .await
    {
        Ok(question) => {
            tracing::info!("Question {} created in course {}", question.id, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(question, "Question created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create question: {e}"),
            )),
        ),
    }
}

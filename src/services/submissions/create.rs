use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireSession;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    course_id: String,
    submission_data: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // submitted_program 必须是 HTTP 可达的存储地址
    if !submission_data.submitted_program.starts_with("http://")
        && !submission_data.submitted_program.starts_with("https://")
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "submitted_program must be an HTTP(S) URL",
        )));
    }

    let storage = service.get_storage(request);

    // 题目必须存在于该课程
    match storage
        .get_question(&submission_data.question_id, &course_id)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create submission: {e}"),
                )),
            );
        }
    }

    let submission_id = uuid::Uuid::new_v4().to_string();

    match storage
        .create_submission(&submission_id, session_user.id, submission_data)
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Submission {} created by user {}",
                submission.id,
                session_user.email
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submission created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create submission: {e}"),
            )),
        ),
    }
}

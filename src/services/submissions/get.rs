use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireSession;
use crate::models::{ApiResponse, ErrorCode};

/// 获取提交详情
///
/// 学生只能读取自己的提交；其他人的提交视为不存在，避免泄露存在性。
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: String,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    match storage.get_submission_by_id(&submission_id).await {
        Ok(Some(submission))
            if submission.user_id == session_user.id
                || session_user.role.can_manage_members() =>
        {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission retrieved successfully",
            )))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get submission: {e}"),
            )),
        ),
    }
}

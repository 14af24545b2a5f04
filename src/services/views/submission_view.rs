use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ViewService, see_other};
use crate::middlewares::RequireSession;
use crate::models::courses::entities::Course;
use crate::models::views::SubmissionViewModel;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::content_fetch::fetch_program_text;

/// 组装提交查看页
///
/// 题目按课程范围查询；题目或提交缺失、提交不属于该题目、
/// 或学生访问他人提交时，统一 303 回课程详情页。
/// 程序文本按 submitted_program 地址即时抓取，查看器只读。
pub async fn submission_view(
    service: &ViewService,
    request: &HttpRequest,
    course_code: String,
    question_id: String,
    submission_id: String,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::resolve_user(request).await else {
        return Ok(see_other("/"));
    };

    let storage = service.get_storage(request);
    let course_id = Course::compose_id(&session_user.school_id, &course_code);
    let course_page = format!("/courses/{course_code}");

    // 1. 题目必须存在于该课程
    let question = match storage.get_question(&question_id, &course_id).await {
        Ok(Some(question)) => question,
        Ok(None) => return Ok(see_other(&course_page)),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to assemble submission view: {e}"),
                )),
            );
        }
    };

    // 2. 提交必须存在、属于该题目，且对查看者可见
    let submission = match storage.get_submission_by_id(&submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(see_other(&course_page)),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to assemble submission view: {e}"),
                )),
            );
        }
    };

    if submission.question_id != question.id {
        return Ok(see_other(&course_page));
    }
    if submission.user_id != session_user.id && !session_user.role.can_manage_members() {
        return Ok(see_other(&course_page));
    }

    // 3. 抓取程序文本
    let code = match fetch_program_text(&submission.submitted_program).await {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch program for submission {}: {}",
                submission.id,
                e
            );
            return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::ContentFetchFailed,
                "Failed to fetch submitted program",
            )));
        }
    };

    let view = SubmissionViewModel::new(code, question, submission);
    Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Submission view assembled")))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ViewService, see_other};
use crate::middlewares::RequireSession;
use crate::models::courses::entities::{Course, CourseInclude};
use crate::models::views::CourseViewModel;
use crate::models::{ApiResponse, ErrorCode};

/// 组装课程详情页
///
/// 课程 ID 由会话用户的学校与路径中的课程代码组合，天然限制在本校范围。
/// 成员关联只对可管理成员的角色查询；未登录 303 回首页，
/// 课程不存在时 303 回课程列表页。
pub async fn course_view(
    service: &ViewService,
    request: &HttpRequest,
    course_code: String,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::resolve_user(request).await else {
        return Ok(see_other("/"));
    };

    let storage = service.get_storage(request);
    let course_id = Course::compose_id(&session_user.school_id, &course_code);

    let include = CourseInclude {
        questions: true,
        members: session_user.role.can_manage_members(),
    };

    match storage.get_course_by_id(&course_id, include).await {
        Ok(Some(course)) => {
            let view = CourseViewModel::build(course, &session_user.role);
            Ok(HttpResponse::Ok().json(ApiResponse::success(view, "Course view assembled")))
        }
        Ok(None) => Ok(see_other("/courses")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to assemble course view: {e}"),
            )),
        ),
    }
}

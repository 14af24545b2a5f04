use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ViewService, see_other};
use crate::middlewares::RequireSession;
use crate::models::users::entities::UserRole;
use crate::models::views::UserManagementViewModel;
use crate::models::{ApiResponse, ErrorCode};

/// 组装用户管理页（管理员）
///
/// 学校名称与本校用户列表一并返回。
/// 未登录或非管理员一律 303 回首页，不暴露页面是否存在。
pub async fn user_management(
    service: &ViewService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::resolve_user(request).await else {
        return Ok(see_other("/"));
    };
    if !matches!(session_user.role, UserRole::Admin) {
        return Ok(see_other("/"));
    }

    let storage = service.get_storage(request);

    let school = match storage.get_school_by_id(&session_user.school_id).await {
        Ok(Some(school)) => school,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SchoolNotFound,
                "School not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to assemble user management view: {e}"),
                )),
            );
        }
    };

    match storage.list_school_users(&session_user.school_id).await {
        Ok(users) => {
            let view = UserManagementViewModel {
                school_name: school.name,
                users,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(view, "User management view assembled")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to assemble user management view: {e}"),
            )),
        ),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::ViewService;
use crate::utils::{SafeCourseCode, SafeQuestionId, SafeSubmissionId};

// 懒加载的全局 ViewService 实例
static VIEW_SERVICE: Lazy<ViewService> = Lazy::new(ViewService::new_lazy);

// HTTP处理程序
pub async fn course_view(
    req: HttpRequest,
    course_code: SafeCourseCode,
) -> ActixResult<HttpResponse> {
    VIEW_SERVICE.course_view(&req, course_code.0).await
}

pub async fn submission_view(
    req: HttpRequest,
    course_code: SafeCourseCode,
    question_id: SafeQuestionId,
    submission_id: SafeSubmissionId,
) -> ActixResult<HttpResponse> {
    VIEW_SERVICE
        .submission_view(&req, course_code.0, question_id.0, submission_id.0)
        .await
}

pub async fn user_management(req: HttpRequest) -> ActixResult<HttpResponse> {
    VIEW_SERVICE.user_management(&req).await
}

// 配置路由，页面视图接口按课程代码寻址
//
// 视图路由不挂认证中间件：未登录访问要求 303 回首页而不是 401，
// 会话解析和管理员门禁都在视图服务层完成。
pub fn configure_view_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/views")
            .route("/courses/{course_code}", web::get().to(course_view))
            .route(
                "/courses/{course_code}/questions/{question_id}/submissions/{submission_id}",
                web::get().to(submission_view),
            )
            .route("/user-management", web::get().to(user_management)),
    );
}

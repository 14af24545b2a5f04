use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::entities::CourseInclude;
use crate::models::courses::requests::{AddMemberRequest, CreateCourseRequest};
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::services::{CourseService, QuestionService, SubmissionService};
use crate::utils::{SafeCourseId, SafeQuestionId, SafeUserIdI64};

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(
    req: HttpRequest,
    course_id: SafeCourseId,
    include: web::Query<CourseInclude>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .get_course(&req, course_id.0, include.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn list_members(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_members(&req, course_id.0).await
}

pub async fn add_member(
    req: HttpRequest,
    course_id: SafeCourseId,
    member_data: web::Json<AddMemberRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_member(&req, course_id.0, member_data.into_inner())
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    course_id: SafeCourseId,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .remove_member(&req, course_id.0, user_id.0)
        .await
}

pub async fn list_questions(
    req: HttpRequest,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list_questions(&req, course_id.0).await
}

pub async fn create_question(
    req: HttpRequest,
    course_id: SafeCourseId,
    question_data: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .create_question(&req, course_id.0, question_data.into_inner())
        .await
}

pub async fn get_question(
    req: HttpRequest,
    course_id: SafeCourseId,
    question_id: SafeQuestionId,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .get_question(&req, course_id.0, question_id.0)
        .await
}

pub async fn list_question_submissions(
    req: HttpRequest,
    course_id: SafeCourseId,
    question_id: SafeQuestionId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_question_submissions(&req, course_id.0, question_id.0)
        .await
}

pub async fn create_submission(
    req: HttpRequest,
    course_id: SafeCourseId,
    question_id: SafeQuestionId,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    // 路径中的题目 ID 为准，忽略请求体中的冗余字段
    let mut submission_data = submission_data.into_inner();
    submission_data.question_id = question_id.0;
    SUBMISSION_SERVICE
        .create_submission(&req, course_id.0, submission_data)
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireSession)
            .service(
                // 用户查询自己的课程列表，管理员看到本校全部课程
                web::resource("").route(web::get().to(list_courses)).route(
                    web::post()
                        .to(create_course)
                        // 教师与管理员可创建课程
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                // 成员管理仅教师与管理员可用
                web::scope("/{course_id}/members")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .service(
                        web::resource("")
                            .route(web::get().to(list_members))
                            .route(web::post().to(add_member)),
                    )
                    .service(
                        web::resource("/{user_id}").route(web::delete().to(remove_member)),
                    ),
            )
            .service(
                web::scope("/{course_id}/questions")
                    .service(
                        web::resource("").route(web::get().to(list_questions)).route(
                            web::post()
                                .to(create_question)
                                // 教师与管理员可出题
                                .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                        ),
                    )
                    .service(web::resource("/{question_id}").route(web::get().to(get_question)))
                    .service(
                        web::resource("/{question_id}/submissions")
                            .route(web::post().to(create_submission))
                            .route(
                                // 教师与管理员按题目批阅提交
                                web::get().to(list_question_submissions).wrap(
                                    middlewares::RequireRole::new_any(UserRole::teacher_roles()),
                                ),
                            ),
                    ),
            ),
    );
}

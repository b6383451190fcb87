use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(teacher_data.into_inner(), &req)
        .await
}

pub async fn get_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(teacher_id.0, &req).await
}

pub async fn update_teacher(
    req: HttpRequest,
    teacher_id: SafeIDI64,
    update_data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(teacher_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_teacher(req: HttpRequest, teacher_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(teacher_id.0, &req).await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_teachers))
            .route(
                "",
                web::post()
                    .to(create_teacher)
                    .wrap(RequireRole::admin_only()),
            )
            .route("/{id}", web::get().to(get_teacher))
            .route(
                "/{id}",
                web::put()
                    .to(update_teacher)
                    .wrap(RequireRole::admin_only()),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_teacher)
                    .wrap(RequireRole::admin_only()),
            ),
    );
}

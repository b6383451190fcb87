use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::notices::requests::{
    CreateNoticeRequest, NoticeListParams, UpdateNoticeRequest,
};
use crate::services::NoticeService;
use crate::utils::SafeIDI64;

static NOTICE_SERVICE: Lazy<NoticeService> = Lazy::new(NoticeService::new_lazy);

pub async fn list_notices(
    req: HttpRequest,
    query: web::Query<NoticeListParams>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.list_notices(query.into_inner(), &req).await
}

pub async fn get_notice(req: HttpRequest, notice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.get_notice(notice_id.0, &req).await
}

pub async fn create_notice(
    req: HttpRequest,
    notice_data: web::Json<CreateNoticeRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE
        .create_notice(notice_data.into_inner(), &req)
        .await
}

pub async fn update_notice(
    req: HttpRequest,
    notice_id: SafeIDI64,
    update_data: web::Json<UpdateNoticeRequest>,
) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE
        .update_notice(notice_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_notice(req: HttpRequest, notice_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTICE_SERVICE.delete_notice(notice_id.0, &req).await
}

// 公告查看无需登录；增删改需管理员或教师
pub fn configure_notice_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notices")
            .route("", web::get().to(list_notices))
            .route("/{id}", web::get().to(get_notice))
            .service(
                web::scope("")
                    .wrap(RequireRole::admin_or_teacher())
                    .wrap(middlewares::RequireJWT)
                    .route("", web::post().to(create_notice))
                    .route("/{id}", web::put().to(update_notice))
                    .route("/{id}", web::delete().to(delete_notice)),
            ),
    );
}

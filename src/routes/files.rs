use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit, RequireRole};
use crate::services::FileService;
use crate::utils::SafeImageRef;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn upload_image(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.upload_image(&request, payload).await
}

pub async fn download_image(reference: SafeImageRef) -> ActixResult<HttpResponse> {
    FILE_SERVICE.download_image(reference.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .route(
                "/images",
                web::post()
                    .to(upload_image)
                    .wrap(RateLimit::file_upload())
                    .wrap(RequireRole::admin_only()),
            )
            .route("/images/{name}", web::get().to(download_image)),
    );
}

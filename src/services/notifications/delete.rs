use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use super::read::resolve_owned;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::auth::unauthorized;

pub async fn delete_notification(
    service: &NotificationService,
    notification_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    if let Err(resp) = resolve_owned(service, notification_id, user_id, request).await {
        return Ok(resp);
    }

    let storage = service.get_storage(request);
    match storage.delete_notification(notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("通知已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除通知失败: {e}"),
            )),
        ),
    }
}

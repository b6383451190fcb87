use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::notifications::requests::NotificationListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::auth::unauthorized;

pub async fn list_notifications(
    service: &NotificationService,
    query: NotificationListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    match storage.list_notifications_with_pagination(user_id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询通知失败: {e}"),
            )),
        ),
    }
}

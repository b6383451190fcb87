use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::notifications::entities::Notification;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::auth::unauthorized;

/// 查找通知并确认调用者是接收者，失败时给出对应响应
pub(super) async fn resolve_owned(
    service: &NotificationService,
    notification_id: i64,
    user_id: i64,
    request: &HttpRequest,
) -> Result<Notification, HttpResponse> {
    let storage = service.get_storage(request);

    let notification = match storage.get_notification_by_id(notification_id).await {
        Ok(Some(n)) => n,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotificationNotFound,
                "Notification not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询通知失败: {e}"),
                )),
            );
        }
    };

    if notification.user_id != Some(user_id) {
        tracing::info!(
            "User {} tried to access notification {} owned by {:?}",
            user_id,
            notification_id,
            notification.user_id
        );
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotificationForbidden,
            "You can only manage your own notifications",
        )));
    }

    Ok(notification)
}

pub async fn mark_read(
    service: &NotificationService,
    notification_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    let notification = match resolve_owned(service, notification_id, user_id, request).await {
        Ok(n) => n,
        Err(resp) => return Ok(resp),
    };

    // 已读的通知不再写库，结果相同
    if !notification.is_read {
        let storage = service.get_storage(request);
        if let Err(e) = storage.mark_notification_read(notification_id).await {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("标记已读失败: {e}"),
                )),
            );
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        Notification {
            is_read: true,
            ..notification
        },
        "已标记为已读",
    )))
}

pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_read(user_id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "全部标记为已读",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("标记已读失败: {e}"),
            )),
        ),
    }
}

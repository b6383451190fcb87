use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::NoticeService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

pub async fn delete_notice(
    service: &NoticeService,
    notice_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 存储层在同一事务内取出并删除，标题为删除前的值
    match storage.delete_notice(notice_id).await {
        Ok(Some(notice)) => {
            info!("Notice {} deleted", notice_id);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Notice Deleted",
                    format!("Notice '{}' deleted successfully", notice.title),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Notice deleted successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "Notice not found",
        ))),
        Err(e) => {
            let msg = format!("Notice deletion failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::NoticeDeleteFailed, msg)))
        }
    }
}

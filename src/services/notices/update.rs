use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{NoticeService, check_notice_text};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    notices::{requests::UpdateNoticeRequest, responses::NoticeResponse},
};
use crate::services::notifications::notify;

pub async fn update_notice(
    service: &NoticeService,
    notice_id: i64,
    update_data: UpdateNoticeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = check_notice_text(
        update_data.title.as_deref(),
        update_data.message.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::NoticeInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_notice(notice_id, update_data).await {
        Ok(Some(notice)) => {
            info!("Notice {} updated", notice.id);
            // 使用修改后的标题
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Notice Edited",
                    format!("Notice '{}' edited successfully", notice.title),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                NoticeResponse { notice },
                "Notice updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "Notice not found",
        ))),
        Err(e) => {
            let msg = format!("Notice update failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::NoticeUpdateFailed, msg)))
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{NoticeService, check_notice_text};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    notices::{requests::CreateNoticeRequest, responses::NoticeResponse},
};
use crate::services::auth::unauthorized;
use crate::services::notifications::notify;

pub async fn create_notice(
    service: &NoticeService,
    notice_data: CreateNoticeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    if let Err(msg) = check_notice_text(Some(&notice_data.title), Some(&notice_data.message)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::NoticeInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_notice(actor, notice_data).await {
        Ok(notice) => {
            info!("Notice {} '{}' created by {}", notice.id, notice.title, actor);
            notify(
                &storage,
                actor,
                "Notice Added",
                format!("Notice '{}' added successfully", notice.title),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                NoticeResponse { notice },
                "Notice created successfully",
            )))
        }
        Err(e) => {
            let msg = format!("Notice creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::NoticeCreationFailed, msg)))
        }
    }
}

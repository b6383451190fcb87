use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode, notices::responses::NoticeResponse};

pub async fn get_notice(
    service: &NoticeService,
    notice_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_notice_by_id(notice_id).await {
        Ok(Some(notice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NoticeResponse { notice },
            "查询成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "Notice not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询公告失败: {e}"),
            )),
        ),
    }
}

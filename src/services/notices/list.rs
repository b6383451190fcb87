use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::{ApiResponse, ErrorCode, notices::requests::NoticeListParams};

pub async fn list_notices(
    service: &NoticeService,
    query: NoticeListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_notices_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询公告列表失败: {e}"),
            )),
        ),
    }
}

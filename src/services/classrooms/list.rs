use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassRoomService;
use crate::models::{ApiResponse, ErrorCode, classrooms::requests::ClassRoomListParams};

pub async fn list_classrooms(
    service: &ClassRoomService,
    query: ClassRoomListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classrooms_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询班级列表失败: {e}"),
            )),
        ),
    }
}

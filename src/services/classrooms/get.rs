use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassRoomService;
use crate::models::{ApiResponse, ErrorCode, classrooms::responses::ClassRoomResponse};

pub async fn get_classroom(
    service: &ClassRoomService,
    classroom_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassRoomResponse { classroom },
            "查询成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "Classroom not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询班级失败: {e}"),
            )),
        ),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassRoomService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

pub async fn delete_classroom(
    service: &ClassRoomService,
    classroom_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let classroom = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassroomNotFound,
                "Classroom not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级失败: {e}"),
                )),
            );
        }
    };

    match storage.delete_classroom(classroom_id).await {
        Ok(true) => {
            info!(
                "Classroom {} {} deleted",
                classroom.class_name, classroom.section
            );
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "ClassRoom Deleted",
                    format!(
                        "ClassRoom '{} {}' deleted successfully",
                        classroom.class_name, classroom.section
                    ),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Classroom deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "Classroom not found",
        ))),
        Err(e) => {
            let msg = format!("Classroom deletion failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::ClassroomDeleteFailed, msg)))
        }
    }
}

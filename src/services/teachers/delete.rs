use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

pub async fn delete_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询教师失败: {e}"),
                )),
            );
        }
    };

    match storage.delete_user(teacher.user_id).await {
        Ok(true) => {
            info!("Teacher {} deleted", teacher.username);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Teacher Deleted",
                    format!("Teacher '{}' deleted successfully", teacher.username),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Teacher deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => {
            let msg = format!("Teacher deletion failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::TeacherDeleteFailed, msg)))
        }
    }
}

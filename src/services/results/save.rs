use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ResultService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    results::{requests::SaveResultRequest, responses::ResultResponse},
};
use crate::services::notifications::notify;

pub async fn save_result(
    service: &ResultService,
    save_request: SaveResultRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = save_request.scores.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ResultInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(save_request.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    match storage.save_result(student.id, save_request.scores).await {
        Ok(result) => {
            info!(
                "Result saved for student {}: {} ({})",
                student.username,
                result.total,
                result.grade.as_str()
            );
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Result Saved",
                    format!(
                        "Result for '{}' saved with grade {}",
                        student.username,
                        result.grade.as_str()
                    ),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ResultResponse { result },
                "Result saved successfully",
            )))
        }
        Err(e) => {
            let msg = format!("Result save failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::ResultSaveFailed, msg)))
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, check_profile_refs};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::UpdateStudentRequest, responses::StudentResponse},
};
use crate::services::notifications::notify;

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(roll_number) = update_data.roll_number
        && roll_number <= 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentInvalid,
            "roll_number must be a positive integer",
        )));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = check_profile_refs(
        &storage,
        update_data.classroom_id.flatten(),
        update_data.profile_image.as_deref(),
    )
    .await
    {
        return Ok(resp);
    }

    match storage.update_student(student_id, update_data).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student.username);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Student Updated",
                    format!("Student '{}' updated successfully", student.username),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentResponse { student },
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::RollNumberAlreadyExists,
            "Roll number already exists",
        ))),
        Err(e) => {
            let msg = format!("Student update failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::StudentUpdateFailed, msg)))
        }
    }
}

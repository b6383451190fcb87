use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherService, check_contact_fields};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{requests::UpdateTeacherRequest, responses::TeacherResponse},
};
use crate::services::notifications::notify;

pub async fn update_teacher(
    service: &TeacherService,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &update_data.full_name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TeacherInvalid,
            "full_name must not be empty",
        )));
    }

    if let Err(resp) = check_contact_fields(
        update_data.email.as_deref(),
        update_data.phone.as_deref(),
        update_data.profile_image.as_deref(),
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.update_teacher(teacher_id, update_data).await {
        Ok(Some(teacher)) => {
            info!("Teacher {} updated", teacher.username);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Teacher Updated",
                    format!("Teacher '{}' updated successfully", teacher.username),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TeacherResponse { teacher },
                "Teacher updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TeacherEmailAlreadyExists,
            "Email already exists",
        ))),
        Err(e) => {
            let msg = format!("Teacher update failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::TeacherUpdateFailed, msg)))
        }
    }
}

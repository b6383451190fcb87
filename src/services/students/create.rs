use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, check_profile_refs};
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::CreateStudentRequest, responses::StudentResponse},
};
use crate::services::notifications::notify;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};

pub async fn create_student(
    service: &StudentService,
    mut student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&student_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_password(&student_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    if student_data.roll_number <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentInvalid,
            "roll_number must be a positive integer",
        )));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = check_profile_refs(
        &storage,
        student_data.classroom_id,
        student_data.profile_image.as_deref(),
    )
    .await
    {
        return Ok(resp);
    }

    // 用户名已被占用时什么都不创建
    match storage.get_user_by_username(&student_data.username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                format!("Username '{}' already exists", student_data.username),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("User lookup failed: {e}"),
                )),
            );
        }
    }

    student_data.password = match hash_password(&student_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created (roll {})", student.username, student.roll_number);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Student Added",
                    format!("Student '{}' added successfully", student.username),
                )
                .await;
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentResponse { student },
                "Student created successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(creation_conflict(&e)),
        Err(e) => {
            let msg = format!("Student creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::StudentCreationFailed, msg)))
        }
    }
}

/// 用户名冲突与档案字段冲突对应不同错误码
pub(super) fn creation_conflict(e: &CampusError) -> HttpResponse {
    if e.is_conflict_on("username") {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            format!("Username already exists: {}", e.message()),
        ))
    } else {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::RollNumberAlreadyExists,
            format!("Roll number already exists: {}", e.message()),
        ))
    }
}

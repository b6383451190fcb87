use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TeacherService, check_contact_fields};
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{requests::CreateTeacherRequest, responses::TeacherResponse},
};
use crate::services::notifications::notify;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};

pub async fn create_teacher(
    service: &TeacherService,
    mut teacher_data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&teacher_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_password(&teacher_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    if teacher_data.full_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TeacherInvalid,
            "full_name must not be empty",
        )));
    }

    if let Err(resp) = check_contact_fields(
        Some(&teacher_data.email),
        Some(&teacher_data.phone),
        teacher_data.profile_image.as_deref(),
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    // 用户名已被占用时什么都不创建
    match storage.get_user_by_username(&teacher_data.username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                format!("Username '{}' already exists", teacher_data.username),
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

    teacher_data.password = match hash_password(&teacher_data.password) {
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

    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            info!("Teacher {} created", teacher.username);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Teacher Added",
                    format!("Teacher '{}' added successfully", teacher.username),
                )
                .await;
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(
                TeacherResponse { teacher },
                "Teacher created successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(creation_conflict(&e)),
        Err(e) => {
            let msg = format!("Teacher creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::TeacherCreationFailed, msg)))
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
            ErrorCode::TeacherEmailAlreadyExists,
            format!("Email already exists: {}", e.message()),
        ))
    }
}

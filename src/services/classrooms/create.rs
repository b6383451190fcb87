use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassRoomService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    classrooms::{requests::CreateClassRoomRequest, responses::ClassRoomResponse},
    users::entities::Role,
};
use crate::services::notifications::notify;

fn invalid(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ClassroomInvalid, msg))
}

pub async fn create_classroom(
    service: &ClassRoomService,
    classroom_data: CreateClassRoomRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if classroom_data.class_name.trim().is_empty() || classroom_data.section.trim().is_empty() {
        return Ok(invalid("class_name and section must not be empty"));
    }
    if classroom_data.capacity <= 0 {
        return Ok(invalid("capacity must be positive"));
    }
    // 人数为手工录入，只要求非负
    if classroom_data.total_students < 0 {
        return Ok(invalid("total_students must not be negative"));
    }

    let storage = service.get_storage(request);

    // 班主任必须是教师账号
    if let Some(teacher_user_id) = classroom_data.class_teacher_id {
        match storage.get_user_by_id(teacher_user_id).await {
            Ok(Some(user)) if user.roles.contains(Role::Teacher) => {}
            Ok(_) => {
                return Ok(invalid(format!(
                    "User {teacher_user_id} is not a teacher"
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询班主任失败: {e}"),
                    )),
                );
            }
        }
    }

    match storage.create_classroom(classroom_data).await {
        Ok(classroom) => {
            info!(
                "Classroom {} {} created",
                classroom.class_name, classroom.section
            );
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "ClassRoom Added",
                    format!(
                        "ClassRoom '{} {}' added successfully",
                        classroom.class_name, classroom.section
                    ),
                )
                .await;
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ClassRoomResponse { classroom },
                "Classroom created successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassroomAlreadyExists,
            "Classroom with this name and section already exists",
        ))),
        Err(e) => {
            let msg = format!("Classroom creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::ClassroomCreationFailed, msg)))
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::RoleFlags, responses::CurrentUserResponse},
};

use super::{AuthService, unauthorized};

/// 当前账号、角色标志及关联的档案 ID
pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(unauthorized());
    };

    let storage = service.get_storage(request);
    let (student_id, teacher_id) = match storage.get_profile_ids(user.id).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load profile: {e}"),
                )),
            );
        }
    };

    let flags = RoleFlags::resolve(Some(&user));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CurrentUserResponse {
            user,
            flags,
            student_id,
            teacher_id,
        },
        "User information retrieved successfully",
    )))
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{SettingsResponse, UpdateSettingsRequest},
};

use super::{AuthService, unauthorized};

pub async fn handle_get_settings(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SettingsResponse {
                dark_mode: user.dark_mode,
            },
            "Settings retrieved successfully",
        ))),
        None => Ok(unauthorized()),
    }
}

pub async fn handle_update_settings(
    service: &AuthService,
    req: UpdateSettingsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    let storage = service.get_storage(request);
    match storage.update_dark_mode(user_id, req.dark_mode).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SettingsResponse {
                dark_mode: req.dark_mode,
            },
            "Settings updated successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update settings: {e}"),
            )),
        ),
    }
}

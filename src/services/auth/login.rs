use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::entities::RoleFlags,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let user = match storage.get_user_by_username(&login_request.username).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(login_failed()),
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Login rejected for {}", user.username);
        return Ok(login_failed());
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    let token_pair = match JwtUtils::generate_token_pair(user.id) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("User {} logged in successfully", user.username);

    let flags = RoleFlags::resolve(Some(&user));
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        flags,
    };

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token))
        .json(ApiResponse::success(response, "Login successful")))
}

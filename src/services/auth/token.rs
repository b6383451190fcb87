use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::{AuthService, unauthorized};

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized());
    };

    // 账号已被删除的 refresh token 不再换发
    if let Some(user_id) = JwtUtils::verify_refresh_token(&refresh_token)
        .ok()
        .and_then(|claims| claims.user_id())
    {
        let storage = service.get_storage(request);
        if let Ok(None) = storage.get_user_by_id(user_id).await {
            return Ok(HttpResponse::Unauthorized()
                .cookie(JwtUtils::create_empty_refresh_token_cookie())
                .json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Account no longer exists",
                )));
        }
    }

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            Ok(HttpResponse::Unauthorized()
                .cookie(JwtUtils::create_empty_refresh_token_cookie())
                .json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                )))
        }
    }
}

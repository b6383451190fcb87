use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::revoked_token_key;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销：当前访问令牌加入注销列表直到过期，同时清除 refresh cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(claims) = RequireJWT::extract_claims(request) {
        match service.get_cache(request) {
            Some(cache) => {
                cache
                    .insert_raw(
                        revoked_token_key(&claims.jti),
                        claims.sub.clone(),
                        claims.remaining_secs(),
                    )
                    .await;
                tracing::info!("User {} logged out", claims.sub);
            }
            None => tracing::warn!("No object cache configured, access token stays valid"),
        }
    }

    // max_age=0 让浏览器删除该 cookie
    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logged out")))
}

/*!
 * 登录校验中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的访问令牌，拒绝已注销的令牌，
 * 并在每个请求里从存储重新加载账号，把账号、令牌 Claims 和解析后的
 * `RoleFlags` 放入请求扩展，供角色门和处理函数使用。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students))
 * ```
 *
 * 处理函数中：
 *
 * ```rust,ignore
 * let user = RequireJWT::extract_user(&req);
 * let flags = RequireJWT::extract_flags(&req);
 * ```
 */

use crate::cache::{CacheResult, ObjectCache, revoked_token_key};
use crate::models::ErrorCode;
use crate::models::users::entities::{RoleFlags, User};
use crate::storage::Storage;
use crate::utils::jwt::{Claims, JwtUtils};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

// 校验令牌并加载账号
async fn authenticate(req: &ServiceRequest) -> Result<(User, Claims), String> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    if let CacheResult::Found(_) = cache.get_raw(&revoked_token_key(&claims.jti)).await {
        return Err("Token has been revoked".to_string());
    }

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in JWT".to_string())?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    // 每次都从存储读取，角色变化立即生效
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    Ok((user, claims))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(
                    req.into_response(HttpResponse::NoContent().finish().map_into_right_body())
                );
            }

            match authenticate(&req).await {
                Ok((user, claims)) => {
                    let flags = RoleFlags::resolve(Some(&user));
                    debug!(
                        "JWT authentication successful for ID: {} ({:?})",
                        user.id, flags
                    );
                    {
                        let mut ext = req.extensions_mut();
                        ext.insert(user);
                        ext.insert(claims);
                        ext.insert(flags);
                    }
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 处理函数中读取认证结果
impl RequireJWT {
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_claims(req: &HttpRequest) -> Option<Claims> {
        req.extensions().get::<Claims>().cloned()
    }

    /// 未经过 RequireJWT 的请求得到全 false 的标志
    pub fn extract_flags(req: &HttpRequest) -> RoleFlags {
        req.extensions()
            .get::<RoleFlags>()
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::users::entities::{Role, RoleSet};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::{App, test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        let flags = RequireJWT::extract_flags(&req);
        match RequireJWT::extract_user(&req) {
            Some(user) => HttpResponse::Ok().json(serde_json::json!({
                "username": user.username,
                "is_teacher": flags.is_teacher,
            })),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn setup() -> (Arc<dyn Storage>, Arc<dyn ObjectCache>, i64) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let cache: Arc<dyn ObjectCache> =
            Arc::new(MokaCacheWrapper::with_settings(1_000, 60));
        let user = storage
            .create_user(CreateUserRequest {
                username: "meera.n".to_string(),
                password_hash: "hashed".to_string(),
                roles: RoleSet::single(Role::Teacher),
                is_superuser: false,
            })
            .await
            .unwrap();
        (storage, cache, user.id)
    }

    #[actix_web::test]
    async fn test_valid_token_resolves_user_and_flags() {
        let (storage, cache, user_id) = setup().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let token = JwtUtils::generate_access_token(user_id).unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["username"], "meera.n");
        assert_eq!(body["is_teacher"], true);
    }

    #[actix_web::test]
    async fn test_missing_and_revoked_tokens_are_unauthorized() {
        let (storage, cache, user_id) = setup().await;
        let token = JwtUtils::generate_access_token(user_id).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        cache
            .insert_raw(revoked_token_key(&claims.jti), "1".to_string(), 60)
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_deleted_identity_is_unauthorized() {
        let (storage, cache, user_id) = setup().await;
        let token = JwtUtils::generate_access_token(user_id).unwrap();
        storage.delete_user(user_id).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

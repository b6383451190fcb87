/*!
 * 角色门中间件
 *
 * 必须嵌套在 RequireJWT 之内使用：RequireJWT 负责登录并解析 `RoleFlags`，
 * 这里只对标志求值。未通过时不会调用被包装的服务。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::resource("")
 *             .route(web::post().to(create_student).wrap(RequireRole::admin_only())),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{Gate, RoleFlags, User},
};

use super::create_error_response;

#[derive(Clone, Copy)]
pub struct RequireRole {
    gate: Gate,
}

impl RequireRole {
    pub fn new(gate: Gate) -> Self {
        Self { gate }
    }

    pub fn admin_only() -> Self {
        Self::new(Gate::AdminOnly)
    }

    pub fn teacher_only() -> Self {
        Self::new(Gate::TeacherOnly)
    }

    pub fn student_only() -> Self {
        Self::new(Gate::StudentOnly)
    }

    pub fn admin_or_teacher() -> Self {
        Self::new(Gate::AdminOrTeacher)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            gate: self.gate,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    gate: Gate,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let gate = self.gate;

        Box::pin(async move {
            let user_id = req.extensions().get::<User>().map(|u| u.id);

            let Some(user_id) = user_id else {
                info!("Role check failed: no authenticated user. Is RequireJWT applied first?");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            // 标志由 RequireJWT 写入，缺失时按账号重新解析
            let flags = req.extensions().get::<RoleFlags>().copied().unwrap_or_else(|| {
                RoleFlags::resolve(req.extensions().get::<User>())
            });

            if gate.allows(&flags) {
                let res = srv.call(req).await?.map_into_left_body();
                Ok(res)
            } else {
                info!(
                    "Access denied for user {} ({:?}). Required: {:?}",
                    user_id, flags, gate
                );
                Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::Forbidden,
                        "Access denied.",
                    )
                    .map_into_right_body(),
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{Role, tests::user_with};
    use actix_web::{App, HttpResponse, test, web};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    async fn call_gate(gate: Gate, user: Option<User>) -> (StatusCode, usize) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = test::init_service(
            App::new()
                .wrap(RequireRole::new(gate))
                .wrap_fn(move |req, srv| {
                    if let Some(user) = user.clone() {
                        let flags = RoleFlags::resolve(Some(&user));
                        req.extensions_mut().insert(user);
                        req.extensions_mut().insert(flags);
                    }
                    srv.call(req)
                })
                .route(
                    "/guarded",
                    web::post().to(move || {
                        let counter = counter.clone();
                        async move {
                            counter.fetch_add(1, Ordering::SeqCst);
                            HttpResponse::Ok().finish()
                        }
                    }),
                ),
        )
        .await;

        let req = test::TestRequest::post().uri("/guarded").to_request();
        let resp = test::call_service(&app, req).await;
        (resp.status(), hits.load(Ordering::SeqCst))
    }

    #[actix_web::test]
    async fn test_denied_gate_does_not_invoke_handler() {
        let student = user_with(&[Role::Student], false);
        let (status, hits) = call_gate(Gate::AdminOrTeacher, Some(student)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(hits, 0);
    }

    #[actix_web::test]
    async fn test_allowed_gate_invokes_handler_once() {
        let teacher = user_with(&[Role::Teacher], false);
        let (status, hits) = call_gate(Gate::AdminOrTeacher, Some(teacher)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hits, 1);
    }

    #[actix_web::test]
    async fn test_superuser_passes_admin_gate_but_not_teacher_gate() {
        let (status, _) = call_gate(Gate::AdminOnly, Some(user_with(&[], true))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, hits) = call_gate(Gate::TeacherOnly, Some(user_with(&[], true))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(hits, 0);
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let (status, hits) = call_gate(Gate::StudentOnly, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(hits, 0);
    }
}

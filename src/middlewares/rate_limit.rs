/*!
 * 请求频率限制中间件
 *
 * 固定窗口计数：同一个键在窗口内最多放行 `max_requests` 次，
 * 超出后返回 429，并在 `Retry-After` 中给出窗口剩余秒数。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 5 次/分钟/客户端
 *     .route(web::post().to(login))
 * ```
 *
 * 已登录请求按账号计数，否则按客户端 IP 计数。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 一个计数窗口
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// 所有 worker 共享的计数表，键为 `前缀:身份`
static RATE_LIMIT_CACHE: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5 次/分钟/客户端
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 刷新令牌：10 次/分钟/客户端
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 图片上传：10 次/分钟/账号
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }
}

/// 客户端 IP，优先使用连接信息，其次是转发头
///
/// 直接暴露在不可信网络时，转发头可以被伪造。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
        && is_valid_ip(ip.trim())
    {
        return ip.trim().to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

/// 计数加一并返回当前窗口；窗口过期时重新开始
async fn hit(key: String, window: Duration) -> Window {
    RATE_LIMIT_CACHE
        .entry(key)
        .and_upsert_with(|existing| {
            let now = Instant::now();
            let next = match existing.map(|e| e.into_value()) {
                Some(w) if now.duration_since(w.started) < window => Window {
                    started: w.started,
                    count: w.count.saturating_add(1),
                },
                _ => Window {
                    started: now,
                    count: 1,
                },
            };
            std::future::ready(next)
        })
        .await
        .into_value()
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            key_prefix: self.key_prefix.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let max_requests = self.max_requests;
        let window_secs = self.window_secs;
        let key_prefix = self.key_prefix.clone();

        Box::pin(async move {
            let user_id = req.extensions().get::<User>().map(|user| user.id);
            let identity = match user_id {
                Some(id) => format!("user:{id}"),
                None => format!("ip:{}", extract_client_ip(&req)),
            };
            let key = format!("{key_prefix}:{identity}");

            let window = hit(key.clone(), Duration::from_secs(window_secs)).await;

            if window.count > max_requests {
                let retry_after = window_secs
                    .saturating_sub(window.started.elapsed().as_secs())
                    .max(1);
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, window.count, max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(retry_after).map_into_right_body(),
                ));
            }

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

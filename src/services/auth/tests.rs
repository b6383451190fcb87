use super::*;
use crate::cache::{CacheResult, object_cache::moka::MokaCacheWrapper, revoked_token_key};
use crate::models::ErrorCode;
use crate::models::users::entities::Role;
use crate::services::test_support::{TestContext, response_code, response_json};
use crate::utils::jwt::JwtUtils;
use actix_web::{HttpMessage, test::TestRequest, web};

fn credentials(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[actix_web::test]
async fn test_login_returns_token_and_flags() {
    let ctx = TestContext::new().await;
    let user = ctx.user_with_password("meera.n", "Campus2024", Role::Teacher).await;
    let service = AuthService::with_storage(ctx.storage.clone());
    let request = TestRequest::default().to_http_request();

    let resp = service
        .login(credentials("meera.n", "Campus2024"), &request)
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.cookies().any(|c| c.name() == "refresh_token"));

    let body = response_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap();
    let claims = JwtUtils::verify_access_token(token).unwrap();
    assert_eq!(claims.user_id(), Some(user.id));
    assert_eq!(body["data"]["flags"]["is_teacher"], true);
    assert!(body["data"]["user"].get("password_hash").is_none());

    let reloaded = ctx.storage.get_user_by_id(user.id).await.unwrap().unwrap();
    assert!(reloaded.last_login.is_some());
}

#[actix_web::test]
async fn test_login_failures_look_the_same() {
    let ctx = TestContext::new().await;
    ctx.user_with_password("meera.n", "Campus2024", Role::Teacher).await;
    let service = AuthService::with_storage(ctx.storage.clone());
    let request = TestRequest::default().to_http_request();

    for (username, password) in [("meera.n", "Wrong2024"), ("nobody.here", "Campus2024")] {
        let resp = service
            .login(credentials(username, password), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);
        assert_eq!(response_code(resp).await, ErrorCode::AuthFailed as i32);
    }
}

#[actix_web::test]
async fn test_logout_revokes_presented_token() {
    let ctx = TestContext::new().await;
    let user = ctx.teacher("meera.n").await;
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
    let service = AuthService::with_storage(ctx.storage.clone());

    let token = JwtUtils::generate_access_token(user.id).unwrap();
    let claims = JwtUtils::verify_access_token(&token).unwrap();
    let request = TestRequest::default()
        .app_data(web::Data::new(cache.clone()))
        .to_http_request();
    request.extensions_mut().insert(user);
    request.extensions_mut().insert(claims.clone());

    let resp = service.logout(&request).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(matches!(
        cache.get_raw(&revoked_token_key(&claims.jti)).await,
        CacheResult::Found(_)
    ));
}

#[actix_web::test]
async fn test_me_includes_profile_ids() {
    let ctx = TestContext::new().await;
    let student = ctx.student("asha01", 3).await;
    let user = ctx.storage.get_user_by_id(student.user_id).await.unwrap().unwrap();
    let service = AuthService::with_storage(ctx.storage.clone());

    let body = response_json(service.me(&ctx.request_as(&user)).await.unwrap()).await;
    assert_eq!(body["data"]["student_id"], student.id);
    assert!(body["data"]["teacher_id"].is_null());
    assert_eq!(body["data"]["flags"]["is_student"], true);
}

#[actix_web::test]
async fn test_settings_round_trip() {
    let ctx = TestContext::new().await;
    let user = ctx.teacher("meera.n").await;
    let service = AuthService::with_storage(ctx.storage.clone());

    let resp = service
        .update_settings(UpdateSettingsRequest { dark_mode: true }, &ctx.request_as(&user))
        .await
        .unwrap();
    assert_eq!(response_json(resp).await["data"]["dark_mode"], true);

    // 扩展里的账号是旧快照，重新加载后再读
    let reloaded = ctx.storage.get_user_by_id(user.id).await.unwrap().unwrap();
    let body = response_json(service.get_settings(&ctx.request_as(&reloaded)).await.unwrap()).await;
    assert_eq!(body["data"]["dark_mode"], true);
}

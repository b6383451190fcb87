use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::ChangePasswordRequest};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

use super::{AuthService, unauthorized};

/// 修改密码，当前访问令牌保持有效
pub async fn handle_change_password(
    service: &AuthService,
    req: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(unauthorized());
    };

    if req.new_password != req.confirm_password {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordMismatch,
            "New password and confirmation do not match",
        )));
    }

    if !verify_password(&req.old_password, &user.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::OldPasswordIncorrect,
            "Old password is incorrect",
        )));
    }

    if let Err(msg) = validate_password(&req.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let password_hash = match hash_password(&req.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let storage = service.get_storage(request);
    match storage.update_password(user.id, password_hash).await {
        Ok(true) => {
            tracing::info!("User {} changed password", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Password changed successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::PasswordChangeFailed,
                format!("Password change failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{TestContext, response_code};
    use crate::models::users::entities::Role;

    fn change(old: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            old_password: old.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_mismatch_and_wrong_old_password_are_distinct() {
        let ctx = TestContext::new().await;
        let user = ctx.user_with_password("asha01", "Campus2024", Role::Student).await;
        let service = AuthService::with_storage(ctx.storage.clone());
        let request = ctx.request_as(&user);

        let resp = service
            .change_password(change("Campus2024", "NewPass2025", "NewPass2026"), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(response_code(resp).await, ErrorCode::PasswordMismatch as i32);

        let resp = service
            .change_password(change("WrongOld1", "NewPass2025", "NewPass2025"), &request)
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(response_code(resp).await, ErrorCode::OldPasswordIncorrect as i32);
    }

    #[actix_web::test]
    async fn test_successful_change_replaces_hash() {
        let ctx = TestContext::new().await;
        let user = ctx.user_with_password("asha01", "Campus2024", Role::Student).await;
        let service = AuthService::with_storage(ctx.storage.clone());

        let resp = service
            .change_password(
                change("Campus2024", "NewPass2025", "NewPass2025"),
                &ctx.request_as(&user),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let reloaded = ctx.storage.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!(verify_password("NewPass2025", &reloaded.password_hash));
        assert!(!verify_password("Campus2024", &reloaded.password_hash));
    }

    #[actix_web::test]
    async fn test_weak_new_password_rejected() {
        let ctx = TestContext::new().await;
        let user = ctx.user_with_password("asha01", "Campus2024", Role::Student).await;
        let service = AuthService::with_storage(ctx.storage.clone());

        let resp = service
            .change_password(change("Campus2024", "short", "short"), &ctx.request_as(&user))
            .await
            .unwrap();
        assert_eq!(response_code(resp).await, ErrorCode::UserPasswordInvalid as i32);
    }
}

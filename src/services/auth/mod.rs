pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod settings;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::auth::{ChangePasswordRequest, LoginRequest, UpdateSettingsRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 注销当前访问令牌
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 当前账号
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_me(self, request).await
    }

    // 修改密码
    pub async fn change_password(
        &self,
        change_request: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_change_password(self, change_request, request).await
    }

    pub async fn get_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::handle_get_settings(self, request).await
    }

    pub async fn update_settings(
        &self,
        update_request: UpdateSettingsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::handle_update_settings(self, update_request, request).await
    }
}

/// 未登录时的统一响应
pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(crate::models::ApiResponse::error_empty(
        crate::models::ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

#[cfg(test)]
mod tests;

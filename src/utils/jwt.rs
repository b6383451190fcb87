use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 用户 ID
    pub jti: String,        // 令牌唯一 ID，注销时按它加入黑名单
    pub token_type: String, // "access" / "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// 距离过期还剩多少秒（至少 1 秒）
    pub fn remaining_secs(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        self.exp.saturating_sub(now).max(1) as u64
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    pub fn generate_access_token(user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token(
            user_id,
            ACCESS_TOKEN,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    pub fn generate_refresh_token(user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token(
            user_id,
            REFRESH_TOKEN,
            chrono::Duration::days(config.jwt.refresh_token_expiry),
        )
    }

    pub fn generate_token(
        user_id: i64,
        token_type: &str,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode_with_secret(Self::secret(), user_id, token_type, expiry)
    }

    pub fn generate_token_pair(user_id: i64) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id)?,
            refresh_token: Self::generate_refresh_token(user_id)?,
        })
    }

    fn encode_with_secret(
        secret: &str,
        user_id: i64,
        token_type: &str,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn decode_with_secret(
        secret: &str,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(Self::secret(), token, ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(Self::secret(), token, REFRESH_TOKEN)
    }

    /// 用 refresh token 换取新的 access token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id)
    }

    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 注销时下发的过期 cookie
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

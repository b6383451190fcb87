//! 路径参数提取器
//!
//! 在进入处理函数之前完成 ID / 文件引用的格式校验，失败直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static IMAGE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.[a-z]{3,4}$")
        .expect("Invalid image reference regex")
});

fn bad_path(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 解析名为 `id` 的正整数路径参数
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        ready(match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SafeIDI64(id)),
            _ => Err(bad_path(format!("Invalid id: '{raw}'"))),
        })
    }
}

/// 头像文件引用（`<uuid>.<ext>`），拒绝任何路径分隔符
#[derive(Debug, Clone)]
pub struct SafeImageRef(pub String);

impl FromRequest for SafeImageRef {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("name").unwrap_or_default();
        ready(if IMAGE_REF_RE.is_match(raw) {
            Ok(SafeImageRef(raw.to_string()))
        } else {
            Err(bad_path("Invalid image reference".to_string()))
        })
    }
}

pub fn is_valid_image_ref(value: &str) -> bool {
    IMAGE_REF_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_id_must_be_positive_integer() {
        let req = TestRequest::default()
            .param("id", "12")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 12);

        for bad in ["0", "-3", "abc", ""] {
            let req = TestRequest::default().param("id", bad).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err(), "{bad}");
        }
    }

    #[test]
    fn test_image_ref_format() {
        assert!(is_valid_image_ref(
            "0b6f1a2c-3d4e-4f50-8a9b-0c1d2e3f4a5b.png"
        ));
        assert!(!is_valid_image_ref("../etc/passwd"));
        assert!(!is_valid_image_ref(
            "0b6f1a2c-3d4e-4f50-8a9b-0c1d2e3f4a5b.png/.."
        ));
    }
}

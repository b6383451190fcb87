use actix_web::{HttpResponse, Result as ActixResult, http::header};
use std::path::Path;

use crate::config::AppConfig;
use crate::errors::CampusError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::image_content_type;

/// `reference` 已由 SafeImageRef 校验，不含路径分隔符
pub async fn handle_download(reference: String) -> ActixResult<HttpResponse> {
    let upload_dir = &AppConfig::get().upload.dir;
    let file_path = Path::new(upload_dir).join(&reference);

    let buf = match tokio::fs::read(&file_path).await {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Image not found",
            )));
        }
        Err(e) => {
            tracing::error!("{}", CampusError::from(e));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let extension = Path::new(&reference)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, image_content_type(&extension)))
        .insert_header((header::CACHE_CONTROL, "private, max-age=86400"))
        .body(buf))
}

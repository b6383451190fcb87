use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, files::responses::ImageUploadResponse};
use crate::utils::file_magic::image_content_type;
use crate::utils::validate_magic_bytes;

/// 落盘文件名，即对外的引用：`<uuid><.ext>`
pub(crate) fn stored_name_for(extension: &str) -> String {
    format!("{}{}", Uuid::new_v4(), extension)
}

pub async fn handle_upload(req: &HttpRequest, mut payload: Multipart) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", CampusError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    let mut file_uploaded = false;
    let mut stored_name = String::new();
    let mut extension = String::new();
    let mut file_size: u64 = 0;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }

        if file_uploaded {
            if !stored_name.is_empty() {
                let _ = fs::remove_file(format!("{upload_dir}/{stored_name}"));
            }
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }
        file_uploaded = true;

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        // 提取扩展名并校验
        extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )));
        }

        stored_name = stored_name_for(&extension);
        let file_path = format!("{upload_dir}/{stored_name}");
        let mut f = match File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", CampusError::file_operation(format!("{e}")));
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件创建失败"),
                ));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    let _ = fs::remove_file(&file_path);
                    return Err(e.into());
                }
            };

            // 第一个 chunk 校验文件头
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "文件内容与扩展名不匹配",
                    )));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            if let Err(e) = f.write_all(&data) {
                let _ = fs::remove_file(&file_path);
                tracing::error!("{}", CampusError::from(e));
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件写入失败"),
                ));
            }
        }

        // 空文件不会经过文件头校验
        if first_chunk {
            let _ = fs::remove_file(&file_path);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "Empty file",
            )));
        }
        file_size = total_size as u64;
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    }

    tracing::info!(
        "Profile image {} ({} bytes) uploaded by {:?}",
        stored_name,
        file_size,
        RequireJWT::extract_user_id(req)
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ImageUploadResponse {
            content_type: image_content_type(&extension).to_string(),
            reference: stored_name,
            size: file_size,
        },
        "Image uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::extractor::is_valid_image_ref;

    #[test]
    fn test_stored_name_is_a_valid_reference() {
        for ext in [".png", ".jpg", ".jpeg", ".gif", ".webp"] {
            let name = stored_name_for(ext);
            assert!(is_valid_image_ref(&name), "{name}");
            assert!(name.ends_with(ext));
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, results::responses::ResultResponse};
use crate::services::auth::unauthorized;

pub async fn get_result(
    service: &ResultService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_result_by_student_id(student_id).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResultResponse { result },
            "查询成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ResultNotFound,
            "Result not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询成绩失败: {e}"),
            )),
        ),
    }
}

pub async fn my_result(
    service: &ResultService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    match storage.get_student_by_user_id(user_id).await {
        Ok(Some(student)) => get_result(service, student.id, request).await,
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "No student profile linked to this account",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学生失败: {e}"),
            )),
        ),
    }
}

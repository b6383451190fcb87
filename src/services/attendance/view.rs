use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, today};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::AttendanceStatus,
        requests::AttendanceQuery,
        responses::{AttendanceDayResponse, MyAttendanceResponse},
    },
};
use crate::services::auth::unauthorized;

pub async fn view_attendance(
    service: &AttendanceService,
    query: AttendanceQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let date = query.date.unwrap_or_else(today);
    let storage = service.get_storage(request);

    match storage.list_attendance_by_date(date).await {
        Ok(records) => {
            let present_count = records
                .iter()
                .filter(|r| r.status == AttendanceStatus::Present)
                .count();
            let absent_count = records.len() - present_count;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceDayResponse {
                    date,
                    records,
                    present_count,
                    absent_count,
                },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询考勤失败: {e}"),
            )),
        ),
    }
}

pub async fn my_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_user_id(user_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "No student profile linked to this account",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    match storage.list_attendance_for_student(student.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MyAttendanceResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询考勤失败: {e}"),
            )),
        ),
    }
}

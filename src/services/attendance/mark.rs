use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AttendanceService, today};
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::MarkAttendanceRequest, responses::MarkAttendanceResponse},
};
use crate::services::notifications::notify;

pub async fn mark_attendance(
    service: &AttendanceService,
    mark_request: MarkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if mark_request.records.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "records must not be empty",
        )));
    }

    let date = mark_request.date.unwrap_or_else(today);
    let entries = mark_request
        .records
        .into_iter()
        .map(|entry| (entry.student_id, entry.status))
        .collect();

    let storage = service.get_storage(request);

    match storage.mark_attendance(date, entries).await {
        Ok(marked) => {
            info!("Attendance for {} marked for {} student(s)", date, marked);
            if let Some(actor) = RequireJWT::extract_user_id(request) {
                notify(
                    &storage,
                    actor,
                    "Attendance Marked",
                    format!("Attendance for {date} marked for {marked} student(s)"),
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MarkAttendanceResponse { date, marked },
                "Attendance marked successfully",
            )))
        }
        Err(CampusError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::AttendanceStudentNotFound, msg))),
        Err(e) => {
            let msg = format!("Attendance marking failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::AttendanceMarkFailed, msg)))
        }
    }
}

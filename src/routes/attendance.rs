use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::attendance::requests::{AttendanceQuery, MarkAttendanceRequest};
use crate::services::AttendanceService;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn mark_attendance(
    req: HttpRequest,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(mark_data.into_inner(), &req)
        .await
}

pub async fn view_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .view_attendance(query.into_inner(), &req)
        .await
}

pub async fn my_attendance(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.my_attendance(&req).await
}

// 点名仅限教师，按日期查看只需登录
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(view_attendance))
            .route(
                "",
                web::post()
                    .to(mark_attendance)
                    .wrap(RequireRole::teacher_only()),
            )
            .route(
                "/me",
                web::get()
                    .to(my_attendance)
                    .wrap(RequireRole::student_only()),
            ),
    );
}

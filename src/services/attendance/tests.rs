use super::*;
use crate::models::ErrorCode;
use crate::models::attendance::{entities::AttendanceStatus, requests::AttendanceEntry};
use crate::services::test_support::{TestContext, response_code, response_json};

fn day(d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn entry(student_id: i64, status: AttendanceStatus) -> AttendanceEntry {
    AttendanceEntry { student_id, status }
}

#[actix_web::test]
async fn test_mark_then_view_counts() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let a = ctx.student("asha01", 1).await;
    let b = ctx.student("vikram02", 2).await;
    let service = AttendanceService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&teacher);

    let resp = service
        .mark_attendance(
            MarkAttendanceRequest {
                date: Some(day(3)),
                records: vec![
                    entry(a.id, AttendanceStatus::Present),
                    entry(b.id, AttendanceStatus::Absent),
                ],
            },
            &request,
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(response_json(resp).await["data"]["marked"], 2);

    let body = response_json(
        service
            .view_attendance(AttendanceQuery { date: Some(day(3)) }, &request)
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["present_count"], 1);
    assert_eq!(body["data"]["absent_count"], 1);
    assert_eq!(body["data"]["records"][0]["username"], "asha01");

    let notifications = ctx.notifications_of(teacher.id).await;
    assert_eq!(notifications[0].title, "Attendance Marked");
}

#[actix_web::test]
async fn test_unknown_student_is_not_found_and_silent() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let a = ctx.student("asha01", 1).await;
    let service = AttendanceService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&teacher);

    let resp = service
        .mark_attendance(
            MarkAttendanceRequest {
                date: Some(day(4)),
                records: vec![
                    entry(a.id, AttendanceStatus::Present),
                    entry(9999, AttendanceStatus::Absent),
                ],
            },
            &request,
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(response_code(resp).await, ErrorCode::AttendanceStudentNotFound as i32);

    assert!(ctx.storage.list_attendance_by_date(day(4)).await.unwrap().is_empty());
    assert!(ctx.notifications_of(teacher.id).await.is_empty());
}

#[actix_web::test]
async fn test_empty_submission_rejected() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = AttendanceService::with_storage(ctx.storage.clone());

    let resp = service
        .mark_attendance(
            MarkAttendanceRequest {
                date: None,
                records: Vec::new(),
            },
            &ctx.request_as(&teacher),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_my_attendance_newest_first() {
    let ctx = TestContext::new().await;
    let a = ctx.student("asha01", 1).await;
    ctx.storage
        .mark_attendance(day(1), vec![(a.id, AttendanceStatus::Absent)])
        .await
        .unwrap();
    ctx.storage
        .mark_attendance(day(2), vec![(a.id, AttendanceStatus::Present)])
        .await
        .unwrap();
    let user = ctx.storage.get_user_by_id(a.user_id).await.unwrap().unwrap();
    let service = AttendanceService::with_storage(ctx.storage.clone());

    let body = response_json(service.my_attendance(&ctx.request_as(&user)).await.unwrap()).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "2025-03-02");
    assert_eq!(items[0]["status"], "Present");
}

#[actix_web::test]
async fn test_my_attendance_without_profile_is_not_found() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = AttendanceService::with_storage(ctx.storage.clone());

    let resp = service.my_attendance(&ctx.request_as(&teacher)).await.unwrap();
    assert_eq!(resp.status(), 404);
}

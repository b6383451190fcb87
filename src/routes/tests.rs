use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, init_service};
use actix_web::{App, web};
use serde_json::json;
use std::sync::Arc;

use super::*;
use crate::cache::{ObjectCache, object_cache::moka::MokaCacheWrapper};
use crate::models::users::entities::User;
use crate::services::test_support::TestContext;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

fn campus_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_classroom_routes)
        .configure(configure_attendance_routes)
        .configure(configure_notice_routes)
        .configure(configure_result_routes);
}

fn app_state(ctx: &TestContext) -> (web::Data<Arc<dyn Storage>>, web::Data<Arc<dyn ObjectCache>>) {
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1_000, 60));
    (web::Data::new(ctx.storage.clone()), web::Data::new(cache))
}

// 装配真实路由表，存储与缓存通过 app_data 注入
macro_rules! campus_app {
    ($ctx:expr) => {{
        let (storage, cache) = app_state(&$ctx);
        init_service(
            App::new()
                .app_data(storage)
                .app_data(cache)
                .configure(campus_routes),
        )
        .await
    }};
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

fn student_payload(username: &str, roll_number: i64) -> serde_json::Value {
    json!({
        "username": username,
        "password": "Campus2024",
        "roll_number": roll_number,
        "classroom_id": null,
        "gender": "Female",
        "date_of_birth": "2012-04-09",
        "address": "12 Lake Road",
        "profile_image": null
    })
}

#[actix_web::test]
async fn test_teacher_cannot_create_student() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("ravi.k").await;
    let app = campus_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&teacher))
        .set_json(student_payload("asha01", 7))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    assert_eq!(ctx.storage.count_users().await.unwrap(), 1);
    assert_eq!(ctx.storage.dashboard_counts().await.unwrap().students, 0);
    assert!(ctx.notifications_of(teacher.id).await.is_empty());
}

#[actix_web::test]
async fn test_admin_creates_student_through_route() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let app = campus_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(bearer(&admin))
        .set_json(student_payload("asha01", 7))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::CREATED);
    assert_eq!(ctx.storage.dashboard_counts().await.unwrap().students, 1);
    assert_eq!(ctx.notifications_of(admin.id).await.len(), 1);
}

#[actix_web::test]
async fn test_student_mutations_are_admin_only() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("ravi.k").await;
    let student = ctx.student("asha01", 7).await;
    let app = campus_app!(ctx);

    let req = TestRequest::put()
        .uri(&format!("/api/v1/students/{}", student.id))
        .insert_header(bearer(&teacher))
        .set_json(json!({ "address": "elsewhere" }))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/students/{}", student.id))
        .insert_header(bearer(&teacher))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let kept = ctx.storage.get_student_by_id(student.id).await.unwrap().unwrap();
    assert_eq!(kept.address, student.address);

    // 查询只需登录
    let req = TestRequest::get()
        .uri(&format!("/api/v1/students/{}", student.id))
        .insert_header(bearer(&teacher))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_teacher_and_classroom_creation_are_admin_only() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("ravi.k").await;
    let app = campus_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/v1/teachers")
        .insert_header(bearer(&teacher))
        .set_json(json!({
            "username": "meera.n",
            "password": "Campus2024",
            "full_name": "Meera N",
            "email": "meera@school.test",
            "subject": "Maths",
            "phone": "9876543210",
            "profile_image": null
        }))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = TestRequest::post()
        .uri("/api/v1/classrooms")
        .insert_header(bearer(&teacher))
        .set_json(json!({
            "class_name": "Grade 5",
            "section": "A",
            "class_teacher_id": teacher.id,
            "total_students": 0,
            "capacity": 30
        }))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let counts = ctx.storage.dashboard_counts().await.unwrap();
    assert_eq!(counts.teachers, 0);
    assert_eq!(counts.classrooms, 0);
    assert_eq!(ctx.storage.count_users().await.unwrap(), 1);
    assert!(ctx.notifications_of(teacher.id).await.is_empty());
}

#[actix_web::test]
async fn test_attendance_marking_is_teacher_only() {
    let ctx = TestContext::new().await;
    let student = ctx.student("asha01", 7).await;
    let student_user = ctx.storage.get_user_by_id(student.user_id).await.unwrap().unwrap();
    let app = campus_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/v1/attendance")
        .insert_header(bearer(&student_user))
        .set_json(json!({
            "date": "2026-03-02",
            "records": [{ "student_id": student.id, "status": "Present" }]
        }))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert!(ctx.storage.list_attendance_by_date(date).await.unwrap().is_empty());
    assert!(ctx.notifications_of(student_user.id).await.is_empty());
}

#[actix_web::test]
async fn test_own_record_routes_are_student_only() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("ravi.k").await;
    let app = campus_app!(ctx);

    for uri in ["/api/v1/attendance/me", "/api/v1/results/me"] {
        let req = TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&teacher))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[actix_web::test]
async fn test_notice_reads_are_public_and_writes_gated() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("ravi.k").await;
    let student = ctx.student("asha01", 7).await;
    let student_user = ctx.storage.get_user_by_id(student.user_id).await.unwrap().unwrap();
    let app = campus_app!(ctx);

    let notice = json!({ "title": "Sports Day", "message": "Friday on the main ground" });

    let req = TestRequest::post()
        .uri("/api/v1/notices")
        .set_json(&notice)
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = TestRequest::post()
        .uri("/api/v1/notices")
        .insert_header(bearer(&student_user))
        .set_json(&notice)
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(ctx.storage.dashboard_counts().await.unwrap().notices, 0);

    let req = TestRequest::post()
        .uri("/api/v1/notices")
        .insert_header(bearer(&teacher))
        .set_json(&notice)
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::CREATED);

    let listed = ctx
        .storage
        .list_notices_with_pagination(Default::default())
        .await
        .unwrap();
    let notice_id = listed.items[0].id;

    for uri in ["/api/v1/notices".to_string(), format!("/api/v1/notices/{notice_id}")] {
        let req = TestRequest::get().uri(&uri).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK, "{uri}");
    }

    let req = TestRequest::delete()
        .uri(&format!("/api/v1/notices/{notice_id}"))
        .insert_header(bearer(&student_user))
        .to_request();
    assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    assert!(ctx.storage.get_notice_by_id(notice_id).await.unwrap().is_some());
}

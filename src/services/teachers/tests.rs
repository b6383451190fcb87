use super::*;
use crate::services::test_support::{TestContext, response_code, response_json};

fn new_teacher(username: &str, email: &str) -> CreateTeacherRequest {
    CreateTeacherRequest {
        username: username.to_string(),
        password: "Campus2024".to_string(),
        full_name: "Meera Nair".to_string(),
        email: email.to_string(),
        subject: "Mathematics".to_string(),
        phone: "+91 98450 12345".to_string(),
        profile_image: None,
    }
}

#[actix_web::test]
async fn test_used_username_creates_nothing_and_sends_nothing() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let service = TeacherService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&admin);

    let resp = service
        .create_teacher(new_teacher("meera.n", "meera@school.test"), &request)
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let before = ctx.notifications_of(admin.id).await.len();

    let resp = service
        .create_teacher(new_teacher("meera.n", "other@school.test"), &request)
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    assert_eq!(response_code(resp).await, ErrorCode::UserNameAlreadyExists as i32);

    assert_eq!(ctx.storage.dashboard_counts().await.unwrap().teachers, 1);
    assert_eq!(ctx.storage.count_users().await.unwrap(), 2);
    assert_eq!(ctx.notifications_of(admin.id).await.len(), before);
}

#[actix_web::test]
async fn test_create_notifies_with_teacher_added() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let service = TeacherService::with_storage(ctx.storage.clone());

    let resp = service
        .create_teacher(new_teacher("meera.n", "meera@school.test"), &ctx.request_as(&admin))
        .await
        .unwrap();
    let body = response_json(resp).await;
    assert_eq!(body["data"]["teacher"]["joining_date"], chrono::Utc::now().date_naive().to_string());

    let notifications = ctx.notifications_of(admin.id).await;
    assert_eq!(notifications[0].title, "Teacher Added");
}

#[actix_web::test]
async fn test_duplicate_email_is_conflict() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let service = TeacherService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&admin);

    service
        .create_teacher(new_teacher("meera.n", "meera@school.test"), &request)
        .await
        .unwrap();
    let resp = service
        .create_teacher(new_teacher("ravi.k", "meera@school.test"), &request)
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    assert!(ctx.storage.get_user_by_username("ravi.k").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_bad_email_rejected() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let service = TeacherService::with_storage(ctx.storage.clone());

    let resp = service
        .create_teacher(new_teacher("meera.n", "not-an-email"), &ctx.request_as(&admin))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(response_code(resp).await, ErrorCode::TeacherInvalid as i32);
}

#[actix_web::test]
async fn test_update_and_delete() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let service = TeacherService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&admin);

    let body = response_json(
        service
            .create_teacher(new_teacher("meera.n", "meera@school.test"), &request)
            .await
            .unwrap(),
    )
    .await;
    let teacher_id = body["data"]["teacher"]["id"].as_i64().unwrap();

    let resp = service
        .update_teacher(
            teacher_id,
            UpdateTeacherRequest {
                subject: Some("Physics".to_string()),
                ..Default::default()
            },
            &request,
        )
        .await
        .unwrap();
    assert_eq!(response_json(resp).await["data"]["teacher"]["subject"], "Physics");

    let resp = service.delete_teacher(teacher_id, &request).await.unwrap();
    assert_eq!(resp.status(), 200);
    let titles: Vec<String> = ctx
        .notifications_of(admin.id)
        .await
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert!(titles.contains(&"Teacher Updated".to_string()));
    assert!(titles.contains(&"Teacher Deleted".to_string()));

    let resp = service.get_teacher(teacher_id, &request).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_storage_conflicts_map_to_the_violated_field() {
    let ctx = TestContext::new().await;
    ctx.storage
        .create_teacher(new_teacher("meera.n", "meera@school.test"))
        .await
        .unwrap();

    let err = ctx
        .storage
        .create_teacher(new_teacher("meera.n", "other@school.test"))
        .await
        .unwrap_err();
    let resp = create::creation_conflict(&err);
    assert_eq!(resp.status(), 409);
    assert_eq!(response_code(resp).await, ErrorCode::UserNameAlreadyExists as i32);

    let err = ctx
        .storage
        .create_teacher(new_teacher("ravi.k", "meera@school.test"))
        .await
        .unwrap_err();
    let resp = create::creation_conflict(&err);
    assert_eq!(response_code(resp).await, ErrorCode::TeacherEmailAlreadyExists as i32);
    assert_eq!(ctx.storage.dashboard_counts().await.unwrap().teachers, 1);
}

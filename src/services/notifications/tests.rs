use super::*;
use crate::models::ErrorCode;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::users::entities::Role;
use crate::services::test_support::{TestContext, response_code, response_json};

async fn seed(ctx: &TestContext, owner: i64, title: &str) -> i64 {
    ctx.storage
        .create_notification(CreateNotificationRequest {
            user_id: Some(owner),
            title: title.to_string(),
            message: format!("{title} message"),
        })
        .await
        .unwrap()
        .id
}

#[actix_web::test]
async fn test_non_owner_cannot_mark_read() {
    let ctx = TestContext::new().await;
    let owner = ctx.teacher("meera.n").await;
    let other = ctx.teacher("ravi.k").await;
    let id = seed(&ctx, owner.id, "Notice Added").await;
    let service = NotificationService::with_storage(ctx.storage.clone());

    let resp = service.mark_read(id, &ctx.request_as(&other)).await.unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(response_code(resp).await, ErrorCode::NotificationForbidden as i32);

    let stored = ctx.storage.get_notification_by_id(id).await.unwrap().unwrap();
    assert!(!stored.is_read);
}

#[actix_web::test]
async fn test_owner_mark_read_is_idempotent() {
    let ctx = TestContext::new().await;
    let owner = ctx.teacher("meera.n").await;
    let id = seed(&ctx, owner.id, "Notice Added").await;
    let service = NotificationService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&owner);

    for _ in 0..2 {
        let resp = service.mark_read(id, &request).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = response_json(resp).await;
        assert_eq!(body["data"]["is_read"], true);
    }

    let stored = ctx.storage.get_notification_by_id(id).await.unwrap().unwrap();
    assert!(stored.is_read);
    assert_eq!(ctx.storage.count_unread_notifications(owner.id).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_unknown_notification_is_not_found() {
    let ctx = TestContext::new().await;
    let owner = ctx.teacher("meera.n").await;
    let service = NotificationService::with_storage(ctx.storage.clone());

    let resp = service.mark_read(9999, &ctx.request_as(&owner)).await.unwrap();
    assert_eq!(resp.status(), 404);
    let resp = service
        .delete_notification(9999, &ctx.request_as(&owner))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_delete_is_owner_only() {
    let ctx = TestContext::new().await;
    let owner = ctx.user_with_password("asha01", "Campus2024", Role::Student).await;
    let other = ctx.teacher("ravi.k").await;
    let id = seed(&ctx, owner.id, "Attendance Marked").await;
    let service = NotificationService::with_storage(ctx.storage.clone());

    let resp = service
        .delete_notification(id, &ctx.request_as(&other))
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    assert!(ctx.storage.get_notification_by_id(id).await.unwrap().is_some());

    let resp = service
        .delete_notification(id, &ctx.request_as(&owner))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(ctx.storage.get_notification_by_id(id).await.unwrap().is_none());
}

#[actix_web::test]
async fn test_list_and_count_only_cover_own_notifications() {
    let ctx = TestContext::new().await;
    let owner = ctx.teacher("meera.n").await;
    let other = ctx.teacher("ravi.k").await;
    seed(&ctx, owner.id, "Notice Added").await;
    seed(&ctx, owner.id, "Notice Edited").await;
    seed(&ctx, other.id, "Notice Deleted").await;
    let service = NotificationService::with_storage(ctx.storage.clone());

    let body = response_json(
        service
            .list_notifications(Default::default(), &ctx.request_as(&owner))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["data"]["pagination"]["total"], 2);

    let body = response_json(service.unread_count(&ctx.request_as(&owner)).await.unwrap()).await;
    assert_eq!(body["data"]["unread_count"], 2);

    let body = response_json(service.mark_all_read(&ctx.request_as(&owner)).await.unwrap()).await;
    assert_eq!(body["data"]["marked_count"], 2);
    assert_eq!(ctx.storage.count_unread_notifications(other.id).await.unwrap(), 1);
}

use super::*;
use crate::models::ErrorCode;
use crate::services::test_support::{TestContext, response_code, response_json};

fn notice(title: &str) -> CreateNoticeRequest {
    CreateNoticeRequest {
        title: title.to_string(),
        message: "School closes at noon on Friday.".to_string(),
    }
}

#[actix_web::test]
async fn test_lifecycle_notifications_use_expected_titles() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = NoticeService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&teacher);

    let body = response_json(service.create_notice(notice("Sports Day"), &request).await.unwrap()).await;
    let id = body["data"]["notice"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["notice"]["created_by"], teacher.id);

    service
        .update_notice(
            id,
            UpdateNoticeRequest {
                title: Some("Sports Day moved".to_string()),
                message: None,
            },
            &request,
        )
        .await
        .unwrap();
    service.delete_notice(id, &request).await.unwrap();

    let mut messages: Vec<(String, String)> = ctx
        .notifications_of(teacher.id)
        .await
        .into_iter()
        .map(|n| (n.title, n.message))
        .collect();
    messages.sort();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].0, "Notice Added");
    assert!(messages[0].1.contains("'Sports Day'"));
    assert_eq!(messages[1].0, "Notice Deleted");
    assert!(messages[1].1.contains("'Sports Day moved'"));
    assert_eq!(messages[2].0, "Notice Edited");
    assert!(messages[2].1.contains("'Sports Day moved'"));
}

#[actix_web::test]
async fn test_missing_notice_is_not_found_everywhere() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = NoticeService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&teacher);

    assert_eq!(service.get_notice(42, &request).await.unwrap().status(), 404);
    assert_eq!(
        service
            .update_notice(42, Default::default(), &request)
            .await
            .unwrap()
            .status(),
        404
    );
    assert_eq!(service.delete_notice(42, &request).await.unwrap().status(), 404);
    assert!(ctx.notifications_of(teacher.id).await.is_empty());
}

#[actix_web::test]
async fn test_second_delete_is_not_found_and_sends_nothing() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = NoticeService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&teacher);

    let notice = ctx
        .storage
        .create_notice(
            teacher.id,
            CreateNoticeRequest {
                title: "Exam Schedule".to_string(),
                message: "Posted on the board".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(service.delete_notice(notice.id, &request).await.unwrap().status(), 200);
    let resp = service.delete_notice(notice.id, &request).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(response_code(resp).await, ErrorCode::NoticeNotFound as i32);

    let titles: Vec<String> = ctx
        .notifications_of(teacher.id)
        .await
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Notice Deleted".to_string()]);
}

#[actix_web::test]
async fn test_blank_title_rejected() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = NoticeService::with_storage(ctx.storage.clone());

    let resp = service.create_notice(notice("   "), &ctx.request_as(&teacher)).await.unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(response_code(resp).await, ErrorCode::NoticeInvalid as i32);
}

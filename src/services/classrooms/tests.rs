use super::*;
use crate::models::ErrorCode;
use crate::models::users::entities::Role;
use crate::services::test_support::{TestContext, response_code, response_json};

fn grade_five(class_teacher_id: Option<i64>) -> CreateClassRoomRequest {
    CreateClassRoomRequest {
        class_name: "Grade 5".to_string(),
        section: "B".to_string(),
        class_teacher_id,
        total_students: 32,
        capacity: 40,
    }
}

#[actix_web::test]
async fn test_class_teacher_must_hold_teacher_role() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let student = ctx.user_with_password("asha01", "Campus2024", Role::Student).await;
    let service = ClassRoomService::with_storage(ctx.storage.clone());

    let resp = service
        .create_classroom(grade_five(Some(student.id)), &ctx.request_as(&admin))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(response_code(resp).await, ErrorCode::ClassroomInvalid as i32);
    assert_eq!(ctx.storage.dashboard_counts().await.unwrap().classrooms, 0);
}

#[actix_web::test]
async fn test_duplicate_pair_is_conflict() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = ClassRoomService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&admin);

    let resp = service
        .create_classroom(grade_five(Some(teacher.id)), &request)
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body = response_json(resp).await;
    assert_eq!(body["data"]["classroom"]["class_teacher_id"], teacher.id);

    let resp = service.create_classroom(grade_five(None), &request).await.unwrap();
    assert_eq!(resp.status(), 409);
    assert_eq!(response_code(resp).await, ErrorCode::ClassroomAlreadyExists as i32);

    let titles: Vec<String> = ctx
        .notifications_of(admin.id)
        .await
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["ClassRoom Added".to_string()]);
}

#[actix_web::test]
async fn test_delete_then_get_is_not_found() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin().await;
    let service = ClassRoomService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&admin);

    let body = response_json(service.create_classroom(grade_five(None), &request).await.unwrap()).await;
    let id = body["data"]["classroom"]["id"].as_i64().unwrap();

    assert_eq!(service.delete_classroom(id, &request).await.unwrap().status(), 200);
    assert_eq!(service.get_classroom(id, &request).await.unwrap().status(), 404);
    assert_eq!(service.delete_classroom(id, &request).await.unwrap().status(), 404);
}

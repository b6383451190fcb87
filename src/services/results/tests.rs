use super::*;
use crate::models::ErrorCode;
use crate::models::results::entities::{SUBJECT_COUNT, SubjectScores};
use crate::services::test_support::{TestContext, response_code, response_json};

fn save(student_id: i64, score: i32) -> SaveResultRequest {
    SaveResultRequest {
        student_id,
        scores: SubjectScores::from_array([score; SUBJECT_COUNT]),
    }
}

#[actix_web::test]
async fn test_resave_overwrites_and_regrades() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let student = ctx.student("asha01", 1).await;
    let service = ResultService::with_storage(ctx.storage.clone());
    let request = ctx.request_as(&teacher);

    let body = response_json(service.save_result(save(student.id, 90), &request).await.unwrap()).await;
    assert_eq!(body["data"]["result"]["total"], 630);
    assert_eq!(body["data"]["result"]["grade"], "A+");

    let body = response_json(service.save_result(save(student.id, 60), &request).await.unwrap()).await;
    assert_eq!(body["data"]["result"]["total"], 420);
    assert_eq!(body["data"]["result"]["grade"], "C");

    let body = response_json(service.get_result(student.id, &request).await.unwrap()).await;
    assert_eq!(body["data"]["result"]["subject1"], 60);
}

#[actix_web::test]
async fn test_out_of_range_score_rejected_without_write() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let student = ctx.student("asha01", 1).await;
    let service = ResultService::with_storage(ctx.storage.clone());

    let resp = service
        .save_result(save(student.id, 101), &ctx.request_as(&teacher))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(response_code(resp).await, ErrorCode::ResultInvalid as i32);
    assert!(ctx.storage.get_result_by_student_id(student.id).await.unwrap().is_none());
    assert!(ctx.notifications_of(teacher.id).await.is_empty());
}

#[actix_web::test]
async fn test_unknown_student_is_not_found() {
    let ctx = TestContext::new().await;
    let teacher = ctx.teacher("meera.n").await;
    let service = ResultService::with_storage(ctx.storage.clone());

    let resp = service.save_result(save(777, 80), &ctx.request_as(&teacher)).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_my_result_resolves_own_profile() {
    let ctx = TestContext::new().await;
    let student = ctx.student("asha01", 1).await;
    ctx.storage
        .save_result(student.id, SubjectScores::from_array([50; SUBJECT_COUNT]))
        .await
        .unwrap();
    let user = ctx.storage.get_user_by_id(student.user_id).await.unwrap().unwrap();
    let service = ResultService::with_storage(ctx.storage.clone());

    let body = response_json(service.my_result(&ctx.request_as(&user)).await.unwrap()).await;
    assert_eq!(body["data"]["result"]["grade"], "F");
    assert_eq!(body["data"]["result"]["student_id"], student.id);
}

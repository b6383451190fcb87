use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, dashboard::DashboardResponse};
use crate::services::auth::unauthorized;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 总数统计以及调用者的未读通知数
    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(unauthorized());
        };
        let flags = RequireJWT::extract_flags(request);
        let storage = self.get_storage(request);

        let counts = match storage.dashboard_counts().await {
            Ok(counts) => counts,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("统计失败: {e}"),
                    )),
                );
            }
        };

        let unread_notifications = match storage.count_unread_notifications(user_id).await {
            Ok(count) => count,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询未读通知数量失败: {e}"),
                    )),
                );
            }
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            DashboardResponse {
                flags,
                counts,
                unread_notifications,
            },
            "查询成功",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::requests::CreateNotificationRequest;
    use crate::services::test_support::{TestContext, response_json};

    #[actix_web::test]
    async fn test_overview_counts_and_flags() {
        let ctx = TestContext::new().await;
        let admin = ctx.admin().await;
        ctx.teacher("meera.n").await;
        ctx.student("asha01", 1).await;
        ctx.student("vikram02", 2).await;
        ctx.storage
            .create_notification(CreateNotificationRequest {
                user_id: Some(admin.id),
                title: "Student Added".to_string(),
                message: "Student 'asha01' added successfully".to_string(),
            })
            .await
            .unwrap();

        let service = DashboardService::with_storage(ctx.storage.clone());
        let body = response_json(service.overview(&ctx.request_as(&admin)).await.unwrap()).await;
        let data = &body["data"];
        assert_eq!(data["students"], 2);
        assert_eq!(data["teachers"], 0);
        assert_eq!(data["classrooms"], 0);
        assert_eq!(data["unread_notifications"], 1);
        assert_eq!(data["flags"]["is_admin"], true);
        assert_eq!(data["flags"]["is_teacher"], false);
    }
}

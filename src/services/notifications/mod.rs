pub mod count;
pub mod delete;
pub mod emit;
pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::NotificationListParams;
use crate::storage::Storage;

pub use emit::notify;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
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

    // 当前账号的通知列表
    pub async fn list_notifications(
        &self,
        query: NotificationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, query, request).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        count::get_unread_count(self, request).await
    }

    // 标记已读，仅限接收者
    pub async fn mark_read(
        &self,
        notification_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        read::mark_read(self, notification_id, request).await
    }

    pub async fn mark_all_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        read::mark_all_read(self, request).await
    }

    pub async fn delete_notification(
        &self,
        notification_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notification(self, notification_id, request).await
    }
}

#[cfg(test)]
mod tests;

pub mod get;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::SaveResultRequest;
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 录入或覆盖成绩
    pub async fn save_result(
        &self,
        save_request: SaveResultRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_result(self, save_request, request).await
    }

    pub async fn get_result(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_result(self, student_id, request).await
    }

    // 学生本人的成绩
    pub async fn my_result(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::my_result(self, request).await
    }
}

#[cfg(test)]
mod tests;

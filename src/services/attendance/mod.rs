pub mod mark;
pub mod view;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{AttendanceQuery, MarkAttendanceRequest};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 教师点名
    pub async fn mark_attendance(
        &self,
        mark_request: MarkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, mark_request, request).await
    }

    // 某天考勤
    pub async fn view_attendance(
        &self,
        query: AttendanceQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        view::view_attendance(self, query, request).await
    }

    // 学生本人的考勤
    pub async fn my_attendance(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        view::my_attendance(self, request).await
    }
}

/// 未指定日期时取服务器本地日期
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests;

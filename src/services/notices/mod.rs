pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notices::requests::{
    CreateNoticeRequest, NoticeListParams, UpdateNoticeRequest,
};
use crate::storage::Storage;

pub struct NoticeService {
    storage: Option<Arc<dyn Storage>>,
}

impl NoticeService {
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

    // 公告列表，无需登录
    pub async fn list_notices(
        &self,
        query: NoticeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_notices(self, query, request).await
    }

    pub async fn get_notice(
        &self,
        notice_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_notice(self, notice_id, request).await
    }

    pub async fn create_notice(
        &self,
        notice_data: CreateNoticeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_notice(self, notice_data, request).await
    }

    pub async fn update_notice(
        &self,
        notice_id: i64,
        update_data: UpdateNoticeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_notice(self, notice_id, update_data, request).await
    }

    pub async fn delete_notice(
        &self,
        notice_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notice(self, notice_id, request).await
    }
}

const TITLE_MAX_CHARS: usize = 200;

// 标题必填且不超过 200 字，正文必填
fn check_notice_text(title: Option<&str>, message: Option<&str>) -> Result<(), &'static str> {
    if let Some(title) = title {
        let len = title.trim().chars().count();
        if len == 0 {
            return Err("title must not be empty");
        }
        if len > TITLE_MAX_CHARS {
            return Err("title must be at most 200 characters");
        }
    }
    if let Some(message) = message
        && message.trim().is_empty()
    {
        return Err("message must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classrooms::requests::{ClassRoomListParams, CreateClassRoomRequest};
use crate::storage::Storage;

pub struct ClassRoomService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassRoomService {
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

    pub async fn list_classrooms(
        &self,
        query: ClassRoomListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_classrooms(self, query, request).await
    }

    pub async fn create_classroom(
        &self,
        classroom_data: CreateClassRoomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_classroom(self, classroom_data, request).await
    }

    pub async fn get_classroom(
        &self,
        classroom_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_classroom(self, classroom_id, request).await
    }

    // 删除班级，学生保留，班级置空
    pub async fn delete_classroom(
        &self,
        classroom_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_classroom(self, classroom_id, request).await
    }
}

#[cfg(test)]
mod tests;

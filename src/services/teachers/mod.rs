pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::extractor::is_valid_image_ref;
use crate::utils::validate::{validate_email, validate_phone};

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    pub async fn list_teachers(
        &self,
        query: TeacherListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, query, request).await
    }

    // 创建教师及其账号
    pub async fn create_teacher(
        &self,
        teacher_data: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, teacher_data, request).await
    }

    pub async fn get_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_teacher(self, teacher_id, request).await
    }

    pub async fn update_teacher(
        &self,
        teacher_id: i64,
        update_data: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, teacher_id, update_data, request).await
    }

    // 删除教师，所带班级的班主任置空
    pub async fn delete_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, teacher_id, request).await
    }
}

// 联系方式与头像引用，字段缺省时跳过
fn check_contact_fields(
    email: Option<&str>,
    phone: Option<&str>,
    profile_image: Option<&str>,
) -> Result<(), HttpResponse> {
    let invalid = |msg: &str| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::TeacherInvalid, msg))
    };

    if let Some(email) = email
        && let Err(msg) = validate_email(email)
    {
        return Err(invalid(msg));
    }
    if let Some(phone) = phone
        && let Err(msg) = validate_phone(phone)
    {
        return Err(invalid(msg));
    }
    if let Some(image) = profile_image
        && !is_valid_image_ref(image)
    {
        return Err(invalid(
            "profile_image must be a reference returned by the image upload",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests;

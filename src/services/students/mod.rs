pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 学生列表
    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    // 创建学生及其账号
    pub async fn create_student(
        &self,
        student_data: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, student_data, request).await
    }

    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, student_id, request).await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        update_data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, update_data, request).await
    }

    // 删除学生，连同账号一起删除
    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, student_id, request).await
    }
}

/// 班级与头像引用的公共校验
pub(super) async fn check_profile_refs(
    storage: &Arc<dyn Storage>,
    classroom_id: Option<i64>,
    profile_image: Option<&str>,
) -> Result<(), HttpResponse> {
    use crate::models::{ApiResponse, ErrorCode};

    if let Some(image) = profile_image
        && !crate::utils::extractor::is_valid_image_ref(image)
    {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentInvalid,
            "profile_image must be a reference returned by the image upload",
        )));
    }

    if let Some(classroom_id) = classroom_id {
        match storage.get_classroom_by_id(classroom_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StudentInvalid,
                    format!("Classroom {classroom_id} does not exist"),
                )));
            }
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Classroom lookup failed: {e}"),
                    )),
                );
            }
        }
    }

    Ok(())
}

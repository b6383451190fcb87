use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::classrooms::requests::{ClassRoomListParams, CreateClassRoomRequest};
use crate::services::ClassRoomService;
use crate::utils::SafeIDI64;

static CLASSROOM_SERVICE: Lazy<ClassRoomService> = Lazy::new(ClassRoomService::new_lazy);

pub async fn list_classrooms(
    req: HttpRequest,
    query: web::Query<ClassRoomListParams>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .list_classrooms(query.into_inner(), &req)
        .await
}

pub async fn create_classroom(
    req: HttpRequest,
    classroom_data: web::Json<CreateClassRoomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .create_classroom(classroom_data.into_inner(), &req)
        .await
}

pub async fn get_classroom(
    req: HttpRequest,
    classroom_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.get_classroom(classroom_id.0, &req).await
}

pub async fn delete_classroom(
    req: HttpRequest,
    classroom_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.delete_classroom(classroom_id.0, &req).await
}

pub fn configure_classroom_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classrooms")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_classrooms))
            .route(
                "",
                web::post()
                    .to(create_classroom)
                    .wrap(RequireRole::admin_only()),
            )
            .route("/{id}", web::get().to(get_classroom))
            .route(
                "/{id}",
                web::delete()
                    .to(delete_classroom)
                    .wrap(RequireRole::admin_only()),
            ),
    );
}

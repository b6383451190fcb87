use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::results::requests::SaveResultRequest;
use crate::services::ResultService;
use crate::utils::SafeIDI64;

static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn save_result(
    req: HttpRequest,
    save_data: web::Json<SaveResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.save_result(save_data.into_inner(), &req).await
}

pub async fn get_result(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_result(student_id.0, &req).await
}

pub async fn my_result(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.my_result(&req).await
}

pub fn configure_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .route(
                "",
                web::post()
                    .to(save_result)
                    .wrap(RequireRole::admin_or_teacher()),
            )
            .route(
                "/me",
                web::get().to(my_result).wrap(RequireRole::student_only()),
            )
            .route("/student/{id}", web::get().to(get_result)),
    );
}

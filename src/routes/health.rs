use crate::models::health::HealthResponse;
use crate::models::response::ApiResponse;
use rocket::get;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

/// Liveness probe; does not touch the database.
#[openapi(tag = "Health")]
#[get("/")]
pub async fn healthcheck() -> Json<ApiResponse<HealthResponse>> {
    ApiResponse::success(HealthResponse { status: "ok" })
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![healthcheck]
}

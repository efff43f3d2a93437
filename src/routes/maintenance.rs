use crate::database::maintenance::MaintenanceRepository;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::maintenance::{Maintenance, MaintenanceRequest};
use crate::models::pagination::PaginationParams;
use crate::models::response::ApiResponse;
use crate::routes::ApiBase;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_okapi::openapi;
use sqlx::PgPool;
use validator::Validate;

/// Log a maintenance issue against a machine
#[openapi(tag = "Maintenance")]
#[post("/", data = "<payload>")]
pub async fn create_maintenance(
    pool: &State<PgPool>,
    base: &State<ApiBase>,
    payload: JsonBody<MaintenanceRequest>,
) -> Result<Created<Json<ApiResponse<Maintenance>>>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    let record = repo.create_maintenance(&payload).await?;
    Ok(Created::new(base.location("maintenance", record.id)).body(ApiResponse::success(record)))
}

#[openapi(tag = "Maintenance")]
#[get("/?<page>&<limit>")]
pub async fn list_maintenance(pool: &State<PgPool>, page: Option<i64>, limit: Option<i64>) -> Result<Json<ApiResponse<Vec<Maintenance>>>, AppError> {
    let pagination = PaginationParams::from_query(page, limit)?;

    let repo = PostgresRepository::new(pool);
    Ok(ApiResponse::success(repo.list_maintenance(pagination.as_ref()).await?))
}

#[openapi(tag = "Maintenance")]
#[get("/<id>")]
pub async fn get_maintenance(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<Maintenance>>, AppError> {
    let id = AppError::parse_id(&id, "maintenance")?;

    let repo = PostgresRepository::new(pool);
    repo.get_maintenance_by_id(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| AppError::NotFound("Maintenance record not found".to_string()))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_maintenance, list_maintenance, get_maintenance]
}

use crate::database::postgres_repository::PostgresRepository;
use crate::database::rental::RentalRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::pagination::PaginationParams;
use crate::models::rental::{Rental, RentalRequest, ReturnRentalResponse};
use crate::models::response::ApiResponse;
use crate::routes::ApiBase;
use crate::service::rental::RentalService;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use validator::Validate;

/// Open a rental; `return_date` may be omitted for an open-ended rental
#[openapi(tag = "Rentals")]
#[post("/", data = "<payload>")]
pub async fn create_rental(pool: &State<PgPool>, base: &State<ApiBase>, payload: JsonBody<RentalRequest>) -> Result<Created<Json<ApiResponse<Rental>>>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    let rental = RentalService::new(&repo).create_rental(&payload).await?;
    Ok(Created::new(base.location("rentals", rental.id)).body(ApiResponse::success(rental)))
}

#[openapi(tag = "Rentals")]
#[get("/?<page>&<limit>")]
pub async fn list_rentals(pool: &State<PgPool>, page: Option<i64>, limit: Option<i64>) -> Result<Json<ApiResponse<Vec<Rental>>>, AppError> {
    let pagination = PaginationParams::from_query(page, limit)?;

    let repo = PostgresRepository::new(pool);
    Ok(ApiResponse::success(repo.list_rentals(pagination.as_ref()).await?))
}

#[openapi(tag = "Rentals")]
#[get("/<id>")]
pub async fn get_rental(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let id = AppError::parse_id(&id, "rental")?;

    let repo = PostgresRepository::new(pool);
    repo.get_rental_by_id(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))
}

/// Stamp the rental as returned now
#[openapi(tag = "Rentals")]
#[put("/<id>/return")]
pub async fn return_rental(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<ReturnRentalResponse>>, AppError> {
    let id = AppError::parse_id(&id, "rental")?;

    let repo = PostgresRepository::new(pool);
    let rental = RentalService::new(&repo).return_rental(id).await?;
    Ok(ApiResponse::success(ReturnRentalResponse {
        message: "Rental returned successfully".to_string(),
        rental,
    }))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_rental, list_rentals, get_rental, return_rental]
}

use crate::database::postgres_repository::PostgresRepository;
use crate::database::review::ReviewRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::pagination::PaginationParams;
use crate::models::response::{ApiResponse, MessageResponse};
use crate::models::review::{Review, ReviewRequest};
use crate::routes::ApiBase;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post};
use rocket_okapi::openapi;
use sqlx::PgPool;
use validator::Validate;

#[openapi(tag = "Reviews")]
#[post("/", data = "<payload>")]
pub async fn create_review(pool: &State<PgPool>, base: &State<ApiBase>, payload: JsonBody<ReviewRequest>) -> Result<Created<Json<ApiResponse<Review>>>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    let review = repo.create_review(&payload).await?;
    Ok(Created::new(base.location("reviews", review.id)).body(ApiResponse::success(review)))
}

#[openapi(tag = "Reviews")]
#[get("/?<page>&<limit>")]
pub async fn list_reviews(pool: &State<PgPool>, page: Option<i64>, limit: Option<i64>) -> Result<Json<ApiResponse<Vec<Review>>>, AppError> {
    let pagination = PaginationParams::from_query(page, limit)?;

    let repo = PostgresRepository::new(pool);
    Ok(ApiResponse::success(repo.list_reviews(pagination.as_ref()).await?))
}

#[openapi(tag = "Reviews")]
#[get("/<id>")]
pub async fn get_review(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<Review>>, AppError> {
    let id = AppError::parse_id(&id, "review")?;

    let repo = PostgresRepository::new(pool);
    repo.get_review_by_id(id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
}

/// Deleting a review that no longer exists reports 404
#[openapi(tag = "Reviews")]
#[delete("/<id>")]
pub async fn delete_review(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = AppError::parse_id(&id, "review")?;

    let repo = PostgresRepository::new(pool);
    repo.delete_review(id).await?;
    Ok(ApiResponse::success(MessageResponse::new("Review deleted successfully")))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_review, list_reviews, get_review, delete_review]
}

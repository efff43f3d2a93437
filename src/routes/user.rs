use crate::auth::AuthenticatedUser;
use crate::database::postgres_repository::PostgresRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::response::{ApiResponse, MessageResponse};
use crate::models::user::{LoginRequest, LoginResponse, UserRequest, UserResponse};
use crate::routes::ApiBase;
use crate::service::auth::AuthService;
use crate::service::token::TokenService;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
#[openapi(tag = "Users")]
#[post("/register", data = "<payload>")]
pub async fn register(
    pool: &State<PgPool>,
    tokens: &State<TokenService>,
    base: &State<ApiBase>,
    payload: JsonBody<UserRequest>,
) -> Result<Created<Json<ApiResponse<UserResponse>>>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    let user = AuthService::new(&repo, tokens).register(&payload).await?;
    Ok(Created::new(base.location("users", user.id)).body(ApiResponse::success(UserResponse::from(&user))))
}

/// Exchange credentials for a signed token
#[openapi(tag = "Users")]
#[post("/login", data = "<payload>")]
pub async fn login(pool: &State<PgPool>, tokens: &State<TokenService>, payload: JsonBody<LoginRequest>) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    let token = AuthService::new(&repo, tokens).login(&payload).await?;
    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// Profile of the token holder
#[openapi(tag = "Users")]
#[get("/me")]
pub async fn get_me(pool: &State<PgPool>, current_user: AuthenticatedUser) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let repo = PostgresRepository::new(pool);
    match repo.get_user_by_id(current_user.id).await? {
        Some(user) => Ok(ApiResponse::success(UserResponse::from(&user))),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}

#[openapi(tag = "Users")]
#[get("/<id>")]
pub async fn get_user(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let id = AppError::parse_id(&id, "user")?;

    let repo = PostgresRepository::new(pool);
    match repo.get_user_by_id(id).await? {
        Some(user) => Ok(ApiResponse::success(UserResponse::from(&user))),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}

/// Replace every user field; the password is re-hashed
#[openapi(tag = "Users")]
#[put("/<id>", data = "<payload>")]
pub async fn update_user(
    pool: &State<PgPool>,
    tokens: &State<TokenService>,
    id: String,
    payload: JsonBody<UserRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = AppError::parse_id(&id, "user")?;
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    AuthService::new(&repo, tokens).update_user(id, &payload).await?;
    Ok(ApiResponse::success(MessageResponse::new("User updated successfully")))
}

#[openapi(tag = "Users")]
#[delete("/<id>")]
pub async fn delete_user(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = AppError::parse_id(&id, "user")?;

    let repo = PostgresRepository::new(pool);
    repo.delete_user(id).await?;
    Ok(ApiResponse::success(MessageResponse::new("User deleted successfully")))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![register, login, get_me, get_user, update_user, delete_user]
}

use crate::database::machine::MachineRepository;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::error::json::JsonBody;
use crate::models::machine::{MachineRequest, MachineResponse, MachineUpdateRequest};
use crate::models::pagination::PaginationParams;
use crate::models::response::{ApiResponse, MessageResponse};
use crate::routes::ApiBase;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use validator::Validate;

/// Add a machine to the catalogue
#[openapi(tag = "Machines")]
#[post("/", data = "<payload>")]
pub async fn create_machine(
    pool: &State<PgPool>,
    base: &State<ApiBase>,
    payload: JsonBody<MachineRequest>,
) -> Result<Created<Json<ApiResponse<MachineResponse>>>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    let machine = repo.create_machine(&payload).await?;
    Ok(Created::new(base.location("machines", machine.id)).body(ApiResponse::success(MachineResponse::from(&machine))))
}

#[openapi(tag = "Machines")]
#[get("/?<page>&<limit>")]
pub async fn list_machines(pool: &State<PgPool>, page: Option<i64>, limit: Option<i64>) -> Result<Json<ApiResponse<Vec<MachineResponse>>>, AppError> {
    let pagination = PaginationParams::from_query(page, limit)?;

    let repo = PostgresRepository::new(pool);
    let machines = repo.list_machines(pagination.as_ref()).await?;
    Ok(ApiResponse::success(machines.iter().map(MachineResponse::from).collect()))
}

#[openapi(tag = "Machines")]
#[get("/<id>")]
pub async fn get_machine(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<MachineResponse>>, AppError> {
    let id = AppError::parse_id(&id, "machine")?;

    let repo = PostgresRepository::new(pool);
    match repo.get_machine_by_id(id).await? {
        Some(machine) => Ok(ApiResponse::success(MachineResponse::from(&machine))),
        None => Err(AppError::NotFound("Machine not found".to_string())),
    }
}

/// Update only the fields present in the body
#[openapi(tag = "Machines")]
#[put("/<id>", data = "<payload>")]
pub async fn update_machine(pool: &State<PgPool>, id: String, payload: JsonBody<MachineUpdateRequest>) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = AppError::parse_id(&id, "machine")?;
    payload.validate()?;

    let repo = PostgresRepository::new(pool);
    repo.update_machine(id, &payload).await?;
    Ok(ApiResponse::success(MessageResponse::new("Machine updated successfully")))
}

#[openapi(tag = "Machines")]
#[delete("/<id>")]
pub async fn delete_machine(pool: &State<PgPool>, id: String) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = AppError::parse_id(&id, "machine")?;

    let repo = PostgresRepository::new(pool);
    repo.delete_machine(id).await?;
    Ok(ApiResponse::success(MessageResponse::new("Machine deleted successfully")))
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![create_machine, list_machines, get_machine, update_machine, delete_machine]
}

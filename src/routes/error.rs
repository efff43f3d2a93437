use crate::auth::AuthFailure;
use crate::error::json::BodyError;
use crate::models::response::ErrorResponse;
use rocket::serde::json::Json;
use rocket::{Request, catch};

#[catch(400)]
pub fn bad_request(req: &Request) -> Json<ErrorResponse> {
    let message = req
        .local_cache(|| None::<BodyError>)
        .as_ref()
        .map(|e| e.0.clone())
        .unwrap_or_else(|| "Bad request".to_string());
    Json(ErrorResponse::new(message))
}

#[catch(401)]
pub fn unauthorized(req: &Request) -> Json<ErrorResponse> {
    let message = req
        .local_cache(|| None::<AuthFailure>)
        .as_ref()
        .map(|e| e.0.clone())
        .unwrap_or_else(|| "Unauthorized".to_string());
    Json(ErrorResponse::new(message))
}

#[catch(404)]
pub fn not_found(_: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not found"))
}

#[catch(409)]
pub fn conflict(_: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Conflict"))
}

#[catch(413)]
pub fn payload_too_large(_: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Payload too large"))
}

#[catch(422)]
pub fn unprocessable_entity(_: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Unprocessable request"))
}

#[catch(500)]
pub fn internal_error(_: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

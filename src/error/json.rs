use rocket::data::{ByteUnit, Data, FromData, Outcome};
use rocket::http::Status;
use rocket::request::Request;
use rocket::serde::json::{Json, serde_json};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RequestBody;
use rocket_okapi::request::OpenApiFromData;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::ops::Deref;
use tracing::warn;

const DEFAULT_JSON_LIMIT: ByteUnit = ByteUnit::Mebibyte(1);

/// A JSON body wrapper that logs why parsing failed and keeps the decoder
/// message around so the 400 catcher can return it to the client.
///
/// Unlike Rocket's built-in `Json`, a malformed body yields `400 Bad Request`
/// (not 422) with a body of `Invalid data: <decoder error>`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// Decoder failure text recorded in the request-local cache.
#[derive(Debug, Clone)]
pub struct BodyError(pub String);

impl<T> Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn reject<'r, T: DeserializeOwned>(req: &'r Request<'_>, status: Status, message: String, error: serde_json::Error) -> Outcome<'r, JsonBody<T>> {
    req.local_cache(|| Some(BodyError(message)));
    Outcome::Error((status, error))
}

#[rocket::async_trait]
impl<'r, T: DeserializeOwned> FromData<'r> for JsonBody<T> {
    type Error = serde_json::Error;

    async fn from_data(req: &'r Request<'_>, data: Data<'r>) -> Outcome<'r, Self> {
        let limit = req.limits().get("json").unwrap_or(DEFAULT_JSON_LIMIT);

        let bytes = match data.open(limit).into_bytes().await {
            Ok(bytes) if bytes.is_complete() => bytes.into_inner(),
            Ok(_) => {
                warn!(
                    method = %req.method(),
                    uri = %req.uri(),
                    "JSON payload exceeded size limit"
                );
                let error = serde_json::Error::io(std::io::Error::other("payload too large"));
                return reject(req, Status::PayloadTooLarge, "Payload too large".to_string(), error);
            }
            Err(e) => {
                warn!(
                    method = %req.method(),
                    uri = %req.uri(),
                    error = %e,
                    "Failed to read request body"
                );
                let message = format!("Invalid data: {}", e);
                return reject(req, Status::BadRequest, message, serde_json::Error::io(e));
            }
        };

        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Outcome::Success(JsonBody(value)),
            Err(e) => {
                let body_preview = String::from_utf8_lossy(&bytes);
                let body_preview: String = if body_preview.chars().count() > 500 {
                    format!("{}...", body_preview.chars().take(500).collect::<String>())
                } else {
                    body_preview.to_string()
                };

                warn!(
                    method = %req.method(),
                    uri = %req.uri(),
                    error_message = %e,
                    error_line = e.line(),
                    error_column = e.column(),
                    error_category = ?e.classify(),
                    request_body = %body_preview,
                    "Failed to parse JSON request body"
                );

                let message = format!("Invalid data: {}", e);
                reject(req, Status::BadRequest, message, e)
            }
        }
    }
}

impl<'r, T: JsonSchema + DeserializeOwned> OpenApiFromData<'r> for JsonBody<T> {
    fn request_body(generator: &mut OpenApiGenerator) -> rocket_okapi::Result<RequestBody> {
        Json::<T>::request_body(generator)
    }
}

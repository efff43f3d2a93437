use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// Outcome marker carried by every response envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Success envelope: `{"status": "success", "data": ...}`.
#[derive(Serialize, Debug, JsonSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: ResponseStatus::Success,
            data,
        })
    }
}

/// Error envelope: `{"status": "error", "message": ...}`.
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"status":"error","message":"Internal server error"}"#.to_string())
    }
}

#[derive(Serialize, Debug, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

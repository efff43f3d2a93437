use crate::models::response::ErrorResponse;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{Request, Response};
use rocket_okapi::OpenApiError;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::response::OpenApiResponderInner;
use std::io::Cursor;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {message}")]
    Db {
        message: String,
        #[source]
        source: sqlx::error::Error,
    },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token is missing in the Authorization header")]
    MissingToken,
    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),
    #[error("Invalid user ID in token: {0}")]
    MalformedUserId(String),
    #[error("Internal server error: {message}")]
    PasswordHash { message: String },
    #[error("Failed to generate token: {message}")]
    TokenSigning {
        message: String,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("User already exists")]
    UserAlreadyExists(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl AppError {
    pub fn db(message: impl Into<String>, source: sqlx::error::Error) -> Self {
        Self::Db {
            message: message.into(),
            source,
        }
    }

    pub fn password_hash(message: impl Into<String>, source: password_hash::Error) -> Self {
        Self::PasswordHash {
            message: format!("{}: {}", message.into(), source),
        }
    }

    pub fn token_signing(message: impl Into<String>, source: jsonwebtoken::errors::Error) -> Self {
        Self::TokenSigning {
            message: format!("{}: {}", message.into(), source),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    /// Parses a path identifier, mapping failures to `BadRequest` with the parser message.
    pub fn parse_id(raw: &str, entity: &str) -> Result<i64, AppError> {
        raw.parse::<i64>()
            .map_err(|e| AppError::BadRequest(format!("Invalid {} ID: {}", entity, e)))
    }
}

impl From<password_hash::Error> for AppError {
    fn from(e: password_hash::Error) -> Self {
        AppError::password_hash("Password hashing failed", e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                let constraint = db.constraint().unwrap_or("unique constraint").to_string();
                AppError::Conflict(format!("Duplicate value violates {}", constraint))
            }
            _ => AppError::db("Database error", e),
        }
    }
}

impl From<&AppError> for Status {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::Db { .. } => Status::InternalServerError,
            AppError::InvalidCredentials => Status::Unauthorized,
            AppError::MissingToken => Status::Unauthorized,
            AppError::InvalidToken(_) => Status::Unauthorized,
            AppError::MalformedUserId(_) => Status::Unauthorized,
            AppError::PasswordHash { .. } => Status::InternalServerError,
            AppError::TokenSigning { .. } => Status::InternalServerError,
            AppError::UserAlreadyExists(_) => Status::Conflict,
            AppError::Conflict(_) => Status::Conflict,
            AppError::BadRequest(_) => Status::BadRequest,
            AppError::NotFound(_) => Status::NotFound,
            AppError::ValidationError(_) => Status::BadRequest,
            AppError::ConfigurationError { .. } => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &Request<'_>) -> rocket::response::Result<'static> {
        let method = req.method();
        let uri = req.uri();

        let request_id = req
            .local_cache(|| None::<crate::middleware::RequestId>)
            .as_ref()
            .map(|r| r.0.as_str())
            .unwrap_or("unknown");

        let user_id = req
            .local_cache(|| None::<crate::auth::AuthenticatedUser>)
            .as_ref()
            .map(|u| u.id.to_string())
            .unwrap_or_else(|| "anonymous".to_string());

        error!(
            error = ?self,
            request_id = %request_id,
            user_id = %user_id,
            method = %method,
            uri = %uri,
            "request failed"
        );

        let status = Status::from(&self);
        let body = ErrorResponse::new(self.to_string()).to_json();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> Result<Responses, OpenApiError> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};
        let mut responses = Responses::default();
        for (code, description) in [
            ("400", "Bad Request"),
            ("401", "Unauthorized"),
            ("404", "Not Found"),
            ("409", "Conflict"),
            ("500", "Internal Server Error"),
        ] {
            responses.responses.insert(
                code.to_string(),
                RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    ..Default::default()
                }),
            );
        }
        Ok(responses)
    }
}

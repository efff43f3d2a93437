use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{Data, Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Correlation id for one request. Reuses a caller-supplied `X-Request-Id`
/// when it looks sane, otherwise a fresh UUID.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }

    fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() && id.len() <= 128 && id.chars().all(|c| c.is_ascii_graphic()) => {
                RequestId(id.to_string())
            }
            _ => RequestId::new(),
        }
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequestId {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        if let Some(request_id) = request.local_cache(|| None::<RequestId>).as_ref() {
            return Outcome::Success(request_id.clone());
        }
        Outcome::Success(RequestId::new())
    }
}

#[derive(Clone, Copy)]
struct StartedAt(Instant);

/// Tags every request with a [`RequestId`], logs it on the way in and out,
/// and stamps the response with the id and a few security headers.
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let request_id = RequestId::from_header(request.headers().get_one(REQUEST_ID_HEADER));
        request.local_cache(|| Some(request_id.clone()));
        request.local_cache(|| Some(StartedAt(Instant::now())));

        info!(
            request_id = %request_id.0,
            method = %request.method(),
            uri = %request.uri(),
            "incoming request"
        );
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let request_id = request
            .local_cache(|| None::<RequestId>)
            .as_ref()
            .map(|r| r.0.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let elapsed_ms = request
            .local_cache(|| None::<StartedAt>)
            .as_ref()
            .map(|started| started.0.elapsed().as_millis())
            .unwrap_or_default();
        let user_id = request
            .local_cache(|| None::<crate::auth::AuthenticatedUser>)
            .as_ref()
            .map(|u| u.id.to_string())
            .unwrap_or_else(|| "anonymous".to_string());

        let status = response.status();

        response.set_header(Header::new(REQUEST_ID_HEADER, request_id.clone()));
        response.set_header(Header::new("X-Content-Type-Options", "nosniff"));
        response.set_header(Header::new("X-Frame-Options", "DENY"));
        response.set_header(Header::new("Cache-Control", "no-store"));

        if status.class().is_server_error() || status.class().is_client_error() {
            warn!(
                request_id = %request_id,
                user_id = %user_id,
                method = %request.method(),
                uri = %request.uri(),
                status = %status.code,
                elapsed_ms = elapsed_ms,
                "request completed with error"
            );
        } else {
            info!(
                request_id = %request_id,
                user_id = %user_id,
                method = %request.method(),
                uri = %request.uri(),
                status = %status.code,
                elapsed_ms = elapsed_ms,
                "request completed"
            );
        }
    }
}

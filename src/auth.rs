use crate::error::app_error::AppError;
use crate::service::token::TokenService;
use rocket::State;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{Object, Responses, SecurityRequirement, SecurityScheme, SecuritySchemeData};
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use serde::Serialize;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Caller identity recovered from a valid bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: i64,
}

/// Rejection reason kept in the request-local cache for the 401 catcher.
#[derive(Debug, Clone)]
pub struct AuthFailure(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let tokens = match req.guard::<&State<TokenService>>().await {
            Outcome::Success(tokens) => tokens,
            _ => return Outcome::Error((Status::InternalServerError, AppError::configuration("Token service is not configured"))),
        };

        match tokens.extract_user_id(req.headers().get_one(AUTHORIZATION_HEADER)) {
            Ok(id) => {
                let user = AuthenticatedUser { id };
                req.local_cache(|| Some(user.clone()));
                Outcome::Success(user)
            }
            Err(err) => {
                req.local_cache(|| Some(AuthFailure(err.to_string())));
                Outcome::Error((Status::from(&err), err))
            }
        }
    }
}

impl<'a> OpenApiFromRequest<'a> for AuthenticatedUser {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        let security_scheme = SecurityScheme {
            description: Some("Signed token returned by POST /users/login, sent as `Authorization: <token>` or `Authorization: Bearer <token>`.".to_string()),
            data: SecuritySchemeData::ApiKey {
                name: AUTHORIZATION_HEADER.to_string(),
                location: "header".to_string(),
            },
            extensions: Object::default(),
        };

        let mut security_req = SecurityRequirement::new();
        security_req.insert("tokenAuth".to_string(), Vec::new());

        Ok(RequestHeaderInput::Security("tokenAuth".to_string(), security_scheme, security_req))
    }

    fn get_responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response};
        let mut responses = Responses::default();
        responses.responses.insert(
            "401".to_string(),
            RefOr::Object(Response {
                description: "Unauthorized - missing, invalid or expired token".to_string(),
                ..Default::default()
            }),
        );
        Ok(responses)
    }
}

mod auth;
mod config;
mod database;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod service;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::app_error::AppError;

use crate::db::{close_db, stage_db};
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use crate::routes::ApiBase;
use crate::service::token::TokenService;
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};
use rocket_okapi::{get_openapi_route, okapi::merge::marge_spec_list};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str, json_format: bool) {
    // RUST_LOG takes precedence over the configured level, e.g.
    //   RUST_LOG=rental_api::routes=debug,info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    // A subscriber may already be installed (tests build several rockets per process).
    let _ = if json_format { subscriber.json().try_init() } else { subscriber.try_init() };
}

fn build_cors(cors_config: &config::CorsConfig) -> Result<CorsOptions, AppError> {
    let is_wildcard = cors_config.allowed_origins.len() == 1 && cors_config.allowed_origins[0] == "*";

    if is_wildcard && cors_config.allow_credentials {
        return Err(AppError::configuration(
            "Invalid CORS configuration: cannot use wildcard origins (*) with credentials enabled",
        ));
    }

    let allowed_origins = if cors_config.allowed_origins.is_empty() {
        AllowedOrigins::some_exact::<&str>(&[])
    } else if is_wildcard {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&cors_config.allowed_origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    Ok(CorsOptions {
        allowed_origins,
        allowed_methods: vec![Method::Get, Method::Post, Method::Put, Method::Delete, Method::Options, Method::Head]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Content-Type", "Authorization", "Accept", "X-Request-Id"]),
        allow_credentials: cors_config.allow_credentials,
        ..Default::default()
    })
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return config::DEFAULT_API_BASE_PATH.to_string();
    }

    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }

    normalized
}

fn join_base_path(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let suffix = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{}", suffix)
    } else {
        format!("{}/{}", base, suffix)
    }
}

struct RouteSpec {
    path: &'static str,
    routes: Vec<rocket::Route>,
    openapi: rocket_okapi::okapi::openapi3::OpenApi,
}

fn collect_route_specs() -> Vec<RouteSpec> {
    let groups = [
        ("/users", app_routes::user::routes()),
        ("/machines", app_routes::machine::routes()),
        ("/rentals", app_routes::rental::routes()),
        ("/reviews", app_routes::review::routes()),
        ("/maintenance", app_routes::maintenance::routes()),
        ("/health", app_routes::health::routes()),
    ];

    groups
        .into_iter()
        .map(|(path, (routes, openapi))| RouteSpec { path, routes, openapi })
        .collect()
}

fn mount_api_routes(mut rocket: Rocket<Build>, base_path: &str, enable_swagger: bool) -> Result<Rocket<Build>, AppError> {
    let mut openapi_list = Vec::new();
    for spec in collect_route_specs() {
        rocket = rocket.mount(join_base_path(base_path, spec.path), spec.routes);
        openapi_list.push((spec.path, spec.openapi));
    }

    if enable_swagger {
        let openapi_docs =
            marge_spec_list(&openapi_list).map_err(|err| AppError::configuration(format!("Could not merge OpenAPI spec: {}", err)))?;

        let settings = rocket_okapi::settings::OpenApiSettings::default();
        rocket = rocket.mount(base_path, vec![get_openapi_route(openapi_docs, &settings)]);

        let openapi_url = join_base_path(base_path, "openapi.json");
        rocket = rocket.mount(
            join_base_path(base_path, "docs"),
            make_swagger_ui(&SwaggerUIConfig {
                url: openapi_url,
                ..Default::default()
            }),
        );
    }

    Ok(rocket)
}

/// Attaches everything that does not depend on a live database: CORS, request
/// logging, the token service, routes and catchers.
pub(crate) fn assemble(rocket: Rocket<Build>, config: &Config, tokens: TokenService) -> Result<Rocket<Build>, AppError> {
    let cors = build_cors(&config.cors)?
        .to_cors()
        .map_err(|e| AppError::configuration(format!("Failed to create CORS fairing: {}", e)))?;
    let base_path = normalize_base_path(&config.api.base_path);

    let rocket = rocket
        .attach(cors)
        .attach(RequestLogger)
        .manage(tokens)
        .manage(ApiBase(base_path.clone()));

    let rocket = mount_api_routes(rocket, &base_path, config.api.enable_swagger)?;

    Ok(rocket.register(
        base_path.as_str(),
        catchers![
            app_routes::error::bad_request,
            app_routes::error::unauthorized,
            app_routes::error::not_found,
            app_routes::error::conflict,
            app_routes::error::payload_too_large,
            app_routes::error::unprocessable_entity,
            app_routes::error::internal_error
        ],
    ))
}

/// Builds the application. Fails when the signing secret is missing or the CORS
/// settings are contradictory; the database is reached at ignition.
pub fn build_rocket(config: Config) -> Result<Rocket<Build>, AppError> {
    init_tracing(&config.logging.level, config.logging.json_format);

    let tokens = TokenService::new(&config.auth)?;

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));

    let rocket = rocket::custom(figment).attach(stage_db(config.database.clone())).attach(close_db());

    assemble(rocket, &config, tokens)
}

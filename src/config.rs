use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

pub const DEFAULT_API_BASE_PATH: &str = "/";
pub const DEFAULT_TOKEN_LIFETIME: &str = "24h";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Full connection URL; takes precedence over the individual fields when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Token lifetime in humantime notation (`24h`, `90m`, `1h 30m`).
    pub token_lifetime: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_path: String,
    pub enable_swagger: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "rental_db".to_string(),
            url: None,
            max_connections: 16,
            min_connections: 1,
            acquire_timeout: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_lifetime: DEFAULT_TOKEN_LIFETIME.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            address: "127.0.0.1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            enable_swagger: true,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Built-in defaults
    /// 2. Rental.toml (optional)
    /// 3. Environment variables prefixed with RENTAL_ (nested with `__`, e.g. RENTAL_DATABASE__HOST)
    /// 4. Plain DB_*, DATABASE_URL and JWT_* variables
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("Rental.toml"))
            .merge(Env::prefixed("RENTAL_").split("__"))
            .merge(
                Env::raw()
                    .only(&["DB_HOST", "DB_PORT", "DB_USER", "DB_PASSWORD", "DB_NAME"])
                    .map(|key| format!("database.{}", key.as_str().to_lowercase().trim_start_matches("db_")).into()),
            )
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "database.url".into()))
            .merge(Env::raw().only(&["JWT_SECRET_KEY"]).map(|_| "auth.secret".into()))
            .merge(Env::raw().only(&["JWT_EXPIRATION_DURATION"]).map(|_| "auth.token_lifetime".into()))
    }
}

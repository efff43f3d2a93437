use crate::config::{AuthConfig, DEFAULT_TOKEN_LIFETIME};
use crate::error::app_error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Claims carried by a bearer token. The subject is the user id in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and validates HS256 bearer tokens.
///
/// Built once at startup from [`AuthConfig`]; a missing secret is a startup
/// failure, never a per-request one.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let secret = config
            .secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| AppError::configuration("JWT_SECRET_KEY (auth.secret) is not set"))?;

        Ok(Self::with_lifetime(secret, parse_token_lifetime(&config.token_lifetime)))
    }

    pub fn with_lifetime(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn issue_token(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_token_at(user_id, Utc::now())
    }

    pub fn issue_token_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let expires_at = issued_at
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::configuration("Token lifetime is out of range"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| AppError::token_signing("Failed to sign token", e))
    }

    /// Verifies signature and expiry. Any failure is reported as `InvalidToken`.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidToken(e.to_string()))
    }

    /// Resolves the user id from an `Authorization` header value.
    ///
    /// The header carries the raw token; a `Bearer ` scheme prefix is tolerated.
    pub fn extract_user_id(&self, header: Option<&str>) -> Result<i64, AppError> {
        let raw = header.map(str::trim).filter(|value| !value.is_empty()).ok_or(AppError::MissingToken)?;
        let token = raw.strip_prefix("Bearer ").map(str::trim).unwrap_or(raw);

        let claims = self.validate_token(token)?;
        user_id_from_claims(&claims)
    }
}

pub fn user_id_from_claims(claims: &Claims) -> Result<i64, AppError> {
    if claims.sub.is_empty() {
        return Err(AppError::MalformedUserId("subject is empty".to_string()));
    }

    let id = claims
        .sub
        .parse::<u64>()
        .map_err(|e| AppError::MalformedUserId(format!("{}: {}", claims.sub, e)))?;

    i64::try_from(id).map_err(|e| AppError::MalformedUserId(format!("{}: {}", claims.sub, e)))
}

/// Longest lifetime accepted from configuration.
pub const MAX_TOKEN_LIFETIME_DAYS: i64 = 36_500;

/// Parses a humantime lifetime, falling back to 24 hours when it is malformed,
/// zero or longer than [`MAX_TOKEN_LIFETIME_DAYS`].
pub fn parse_token_lifetime(raw: &str) -> Duration {
    let fallback = Duration::hours(24);
    let parsed = humantime::parse_duration(raw.trim())
        .ok()
        .filter(|lifetime| !lifetime.is_zero())
        .and_then(|lifetime| Duration::from_std(lifetime).ok())
        .filter(|lifetime| *lifetime <= Duration::days(MAX_TOKEN_LIFETIME_DAYS));

    match parsed {
        Some(lifetime) => lifetime,
        None => {
            warn!(
                token_lifetime = %raw,
                fallback = DEFAULT_TOKEN_LIFETIME,
                "unusable token lifetime, using fallback"
            );
            fallback
        }
    }
}

use crate::error::app_error::AppError;
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::sync::LazyLock;

/// A real Argon2 hash generated once, used as a timing decoy so that logins
/// for unknown emails cost the same as logins for existing users.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash_password("dummy-never-matches").ok());

/// Hashes a password into a PHC string (algorithm, parameters and salt included).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Constant-time check of `password` against a stored PHC string.
pub fn verify_password(stored_hash: &str, password: &str) -> Result<(), AppError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AppError::password_hash("Failed to parse stored password hash", e))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::InvalidCredentials)
}

pub fn dummy_verify(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref()
        && let Ok(parsed) = PasswordHash::new(hash)
    {
        let _ = Argon2::default().verify_password(password.as_bytes(), &parsed);
    }
}

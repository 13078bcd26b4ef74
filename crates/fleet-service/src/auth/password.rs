use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use fleet_db::model::driver::Driver;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Hashes a password using Argon2id with a random salt.
///
/// ## Errors
/// Returns an error if password hashing fails.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Failed to hash password: {e}")))?;

    Ok(password_hash.to_string())
}

/// ## Summary
/// Verifies a password against a stored Argon2 hash.
///
/// ## Errors
/// Returns `NotAuthenticated` on mismatch, or an error if the stored hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> ServiceResult<()> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Invalid password hash: {e}")))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|err| {
            tracing::trace!("Password verification failed: {}", err);
            ServiceError::NotAuthenticated
        })
}

/// Whether `password` is the password of an active `driver`.
///
/// A malformed stored hash counts as a mismatch.
#[must_use]
pub fn check_password(driver: &Driver, password: &str) -> bool {
    if !driver.is_active {
        return false;
    }
    match verify_password(password, &driver.password_hash) {
        Ok(()) => true,
        Err(ServiceError::NotAuthenticated) => false,
        Err(err) => {
            tracing::warn!(driver_id = %driver.id, error = %err, "Stored password hash is unusable");
            false
        }
    }
}

use thiserror::Error;

use crate::form::FormErrors;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] fleet_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] fleet_core::error::CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid form: {0}")]
    InvalidForm(FormErrors),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

/// Maps a unique constraint to the form field it protects.
#[derive(Debug, Clone, Copy)]
pub struct UniqueField {
    pub constraint: &'static str,
    pub field: &'static str,
    pub message: &'static str,
}

impl UniqueField {
    /// The form error reported when the value is already taken.
    #[must_use]
    pub fn taken(&self) -> ServiceError {
        ServiceError::InvalidForm(FormErrors::single(self.field, self.message))
    }
}

impl ServiceError {
    /// ## Summary
    /// Turns a unique violation on one of `fields` into a field error.
    ///
    /// Covers the window between the existence check and the insert; any
    /// other database error is passed through.
    #[must_use]
    pub fn from_unique_violation(err: fleet_db::error::DbError, fields: &[UniqueField]) -> Self {
        let matched = err
            .unique_violation()
            .and_then(|constraint| fields.iter().find(|f| f.constraint == constraint))
            .copied();

        match matched {
            Some(unique) => unique.taken(),
            None => Self::DatabaseError(err),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

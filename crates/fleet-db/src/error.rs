use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    CoreError(#[from] fleet_core::error::CoreError),
}

impl DbError {
    /// Name of the violated unique constraint, if this error is one.
    #[must_use]
    pub fn unique_violation(&self) -> Option<&str> {
        match self {
            Self::DatabaseError(err) => unique_violation(err),
            _ => None,
        }
    }
}

/// ## Summary
/// Extracts the constraint name from a unique-violation diesel error.
#[must_use]
pub fn unique_violation(err: &diesel::result::Error) -> Option<&str> {
    use diesel::result::{DatabaseErrorKind, Error};

    match err {
        Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => info.constraint_name(),
        _ => None,
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;

use salvo::{Depot, Request, Response, Writer, async_trait, http::StatusCode, writing::Json};
use serde_json::json;
use thiserror::Error;

use fleet_service::{error::ServiceError, form::FormErrors};

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] fleet_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] fleet_core::error::CoreError),

    /// A bound form failed validation; rendered back with its data and errors.
    #[error("Invalid {name}: {errors}")]
    InvalidForm {
        name: &'static str,
        data: serde_json::Value,
        errors: FormErrors,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] salvo::http::header::InvalidHeaderValue),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => match err {
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
                ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                ServiceError::InvalidForm(_) => StatusCode::BAD_REQUEST,
                ServiceError::DatabaseError(fleet_db::error::DbError::PoolError(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::DatabaseError(fleet_db::error::DbError::PoolError(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::InvalidForm { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) | Self::CoreError(_) | Self::InvalidHeader(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body describing the error. Server-side failures are not detailed.
    fn body(&self, status: StatusCode) -> serde_json::Value {
        match self {
            Self::InvalidForm { name, data, errors } => json!({
                "form": { "name": name, "data": data, "errors": errors },
            }),
            Self::ServiceError(ServiceError::InvalidForm(errors)) => json!({ "errors": errors }),
            _ if status.is_server_error() => json!({
                "error": status.canonical_reason().unwrap_or("Internal Server Error"),
            }),
            other => json!({ "error": other.to_string() }),
        }
    }

    /// Sets the status code and JSON body on `res`.
    pub fn render_into(self, res: &mut Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        res.status_code(status);
        res.render(Json(self.body(status)));
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        self.render_into(res);
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

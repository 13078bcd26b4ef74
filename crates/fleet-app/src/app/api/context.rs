//! Shared plumbing for page handlers: path ids, bound forms and redirects.

use salvo::{
    Request, Response,
    http::{HeaderValue, StatusCode, header::LOCATION},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, AppResult};
use fleet_service::{error::ServiceError, form::Form};

/// ## Summary
/// Answers `302 Found` pointing at `location`.
///
/// ## Errors
/// Returns an error if `location` is not a valid header value.
pub fn redirect(res: &mut Response, location: &str) -> AppResult<()> {
    res.status_code(StatusCode::FOUND);
    res.headers_mut()
        .insert(LOCATION, HeaderValue::from_str(location)?);
    Ok(())
}

/// ## Summary
/// Reads the `{id}` path segment as a record id.
///
/// ## Errors
/// Returns `NotFound` if the segment is missing or not a uuid.
pub fn path_id(req: &Request) -> AppResult<uuid::Uuid> {
    req.param::<String>("id")
        .and_then(|raw| uuid::Uuid::parse_str(&raw).ok())
        .ok_or_else(|| AppError::NotFound("No record matches the given query".to_string()))
}

/// ## Summary
/// Binds a form from a urlencoded, multipart or JSON body.
///
/// ## Errors
/// Returns `BadRequest` if the body cannot be read as the form.
pub async fn bind_form<F>(req: &mut Request) -> AppResult<F>
where
    F: Form + DeserializeOwned + Send,
{
    req.parse_body::<F>().await.map_err(|e| {
        tracing::debug!(form = F::NAME, error = %e, "Unreadable form body");
        AppError::BadRequest(format!("Could not read {}: {e}", F::NAME))
    })
}

/// ## Summary
/// Attaches the bound form to a validation failure so it is rendered back
/// with its data. Other errors pass through.
pub fn with_form<F>(form: &F) -> impl FnOnce(ServiceError) -> AppError + '_
where
    F: Form + Serialize,
{
    move |err| match err {
        ServiceError::InvalidForm(errors) => AppError::InvalidForm {
            name: F::NAME,
            data: serde_json::to_value(form).unwrap_or(serde_json::Value::Null),
            errors,
        },
        other => other.into(),
    }
}

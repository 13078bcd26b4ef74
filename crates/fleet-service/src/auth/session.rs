//! Session lifecycle: login creates a row and hands back its token, logout
//! removes it.

use fleet_db::{
    db::{connection::DbConnection, query},
    model::session::{NewSession, Session},
};

use super::password::check_password;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Verifies `username`/`password` and opens a session lasting `ttl`.
///
/// ## Side Effects
/// - Deletes expired sessions
/// - Inserts a session row
///
/// ## Errors
/// Returns `NotAuthenticated` if the credentials do not match an active
/// driver, or a database error.
#[tracing::instrument(skip(conn, password))]
pub async fn login(
    conn: &mut DbConnection<'_>,
    username: &str,
    password: &str,
    ttl: std::time::Duration,
) -> ServiceResult<Session> {
    let ttl = chrono::Duration::from_std(ttl)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Session lifetime out of range: {e}")))?;

    let Some(driver) = query::driver::find_by_username(conn, username)
        .await?
        .filter(|driver| check_password(driver, password))
    else {
        tracing::debug!("Rejected login");
        return Err(ServiceError::NotAuthenticated);
    };

    let now = chrono::Utc::now();
    let expired = query::session::delete_expired(conn, now).await?;
    if expired > 0 {
        tracing::debug!(expired, "Removed expired sessions");
    }

    let session = query::session::insert(
        conn,
        &NewSession {
            id: uuid::Uuid::new_v4(),
            driver_id: driver.id,
            expires_at: now + ttl,
        },
    )
    .await?;

    tracing::info!(driver_id = %driver.id, "Driver logged in");

    Ok(session)
}

/// ## Summary
/// Ends the session identified by `token`. Unknown tokens are ignored.
///
/// ## Errors
/// Returns an error if the delete fails.
#[tracing::instrument(skip(conn, token))]
pub async fn logout(conn: &mut DbConnection<'_>, token: uuid::Uuid) -> ServiceResult<()> {
    let removed = query::session::delete(conn, token).await?;
    tracing::debug!(removed, "Session closed");
    Ok(())
}

//! Login session queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    db::{
        connection::DbConnection,
        schema::{driver, session},
    },
    error::DbResult,
    model::{
        driver::Driver,
        session::{NewSession, Session},
    },
};

/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_session: &NewSession) -> DbResult<Session> {
    Ok(diesel::insert_into(session::table)
        .values(new_session)
        .returning(Session::as_select())
        .get_result::<Session>(conn)
        .await?)
}

/// ## Summary
/// Resolves a session token to its active driver. Expired sessions and
/// deactivated accounts resolve to `None`.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_driver(
    conn: &mut DbConnection<'_>,
    token: uuid::Uuid,
    now: chrono::DateTime<chrono::Utc>,
) -> DbResult<Option<Driver>> {
    Ok(session::table
        .inner_join(driver::table)
        .filter(session::id.eq(token))
        .filter(session::expires_at.gt(now))
        .filter(driver::is_active.eq(true))
        .select(Driver::as_select())
        .first::<Driver>(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, token: uuid::Uuid) -> DbResult<usize> {
    Ok(diesel::delete(session::table.find(token))
        .execute(conn)
        .await?)
}

/// ## Summary
/// Removes sessions that expired before `now`.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete_expired(
    conn: &mut DbConnection<'_>,
    now: chrono::DateTime<chrono::Utc>,
) -> DbResult<usize> {
    Ok(
        diesel::delete(session::table.filter(session::expires_at.le(now)))
            .execute(conn)
            .await?,
    )
}

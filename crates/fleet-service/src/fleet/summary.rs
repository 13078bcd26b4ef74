//! Landing page summary.

use diesel_async::{AsyncConnection, scoped_futures::ScopedFutureExt};
use fleet_db::db::{connection::DbConnection, query};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexContext {
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
    pub num_visits: i32,
}

/// ## Summary
/// Counts a landing page visit for `driver_id` and gathers the record counts.
///
/// The counter is bumped with a single `UPDATE ... RETURNING`, so concurrent
/// loads by the same driver never lose an increment. The value reported is the
/// count including this visit.
///
/// ## Errors
/// Returns `NotFound` if the driver no longer exists, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn record_visit(
    conn: &mut DbConnection<'_>,
    driver_id: uuid::Uuid,
) -> ServiceResult<IndexContext> {
    let context = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let num_visits = query::driver::increment_visits(tx, driver_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("driver {driver_id}")))?;

                Ok(IndexContext {
                    num_drivers: query::driver::count(tx, None).await?,
                    num_cars: query::car::count(tx, None).await?,
                    num_manufacturers: query::manufacturer::count(tx, None).await?,
                    num_visits,
                })
            }
            .scope_boxed()
        })
        .await?;

    tracing::debug!(num_visits = context.num_visits, "Recorded landing visit");

    Ok(context)
}

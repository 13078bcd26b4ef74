//! Driver (account) queries. Default order is by username.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    db::{connection::DbConnection, query::text_match::contains_pattern, schema::driver},
    error::DbResult,
    model::driver::{Driver, NewDriver},
};

/// ## Summary
/// Counts drivers whose username contains `username_filter`, or all of them.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count(conn: &mut DbConnection<'_>, username_filter: Option<&str>) -> DbResult<i64> {
    let mut query = driver::table.select(diesel::dsl::count_star()).into_boxed();
    if let Some(value) = username_filter {
        query = query.filter(driver::username.ilike(contains_pattern(value)));
    }
    Ok(query.get_result::<i64>(conn).await?)
}

/// ## Summary
/// Loads one page of drivers, narrowed by `username_filter` when given.
///
/// ## Errors
/// Returns an error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    username_filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> DbResult<Vec<Driver>> {
    let mut query = driver::table.select(Driver::as_select()).into_boxed();
    if let Some(value) = username_filter {
        query = query.filter(driver::username.ilike(contains_pattern(value)));
    }
    Ok(query
        .order(driver::username.asc())
        .limit(limit)
        .offset(offset)
        .load::<Driver>(conn)
        .await?)
}

/// ## Summary
/// Loads every driver in default order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn all(conn: &mut DbConnection<'_>) -> DbResult<Vec<Driver>> {
    Ok(driver::table
        .select(Driver::as_select())
        .order(driver::username.asc())
        .load::<Driver>(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<Option<Driver>> {
    Ok(driver::table
        .find(id)
        .select(Driver::as_select())
        .first::<Driver>(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_username(
    conn: &mut DbConnection<'_>,
    username: &str,
) -> DbResult<Option<Driver>> {
    Ok(driver::table
        .filter(driver::username.eq(username))
        .select(Driver::as_select())
        .first::<Driver>(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn username_taken(conn: &mut DbConnection<'_>, username: &str) -> DbResult<bool> {
    Ok(driver::table
        .filter(driver::username.eq(username))
        .select(driver::id)
        .first::<uuid::Uuid>(conn)
        .await
        .optional()?
        .is_some())
}

/// ## Summary
/// Returns whether another driver (not `except`) already holds `license_number`.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn license_number_taken(
    conn: &mut DbConnection<'_>,
    license_number: &str,
    except: Option<uuid::Uuid>,
) -> DbResult<bool> {
    let mut query = driver::table
        .filter(driver::license_number.eq(license_number))
        .select(driver::id)
        .into_boxed();
    if let Some(id) = except {
        query = query.filter(driver::id.ne(id));
    }
    Ok(query
        .first::<uuid::Uuid>(conn)
        .await
        .optional()?
        .is_some())
}

/// ## Summary
/// Counts how many of `ids` refer to existing drivers.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count_existing(conn: &mut DbConnection<'_>, ids: &[uuid::Uuid]) -> DbResult<i64> {
    Ok(driver::table
        .filter(driver::id.eq_any(ids))
        .count()
        .get_result::<i64>(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the insert fails, including unique violations.
pub async fn insert(conn: &mut DbConnection<'_>, new_driver: &NewDriver<'_>) -> DbResult<Driver> {
    Ok(diesel::insert_into(driver::table)
        .values(new_driver)
        .returning(Driver::as_select())
        .get_result::<Driver>(conn)
        .await?)
}

/// ## Summary
/// Sets a driver's license number, returning `None` if the driver does not exist.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update_license_number(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    license_number: &str,
) -> DbResult<Option<Driver>> {
    Ok(diesel::update(driver::table.find(id))
        .set(driver::license_number.eq(license_number))
        .returning(Driver::as_select())
        .get_result::<Driver>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Adds one to the driver's visit counter in a single statement and returns
/// the new value, or `None` if the driver does not exist.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn increment_visits(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<Option<i32>> {
    Ok(diesel::update(driver::table.find(id))
        .set(driver::num_visits.eq(driver::num_visits + 1))
        .returning(driver::num_visits)
        .get_result::<i32>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Deletes a driver together with its sessions and car assignments.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<usize> {
    Ok(diesel::delete(driver::table.find(id)).execute(conn).await?)
}

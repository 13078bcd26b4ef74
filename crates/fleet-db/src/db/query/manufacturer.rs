//! Manufacturer queries. Default order is by name.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    db::{connection::DbConnection, query::text_match::contains_pattern, schema::manufacturer},
    error::DbResult,
    model::manufacturer::{Manufacturer, ManufacturerChangeset, NewManufacturer},
};

/// ## Summary
/// Counts manufacturers whose name contains `name_filter`, or all of them.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count(conn: &mut DbConnection<'_>, name_filter: Option<&str>) -> DbResult<i64> {
    let mut query = manufacturer::table
        .select(diesel::dsl::count_star())
        .into_boxed();
    if let Some(value) = name_filter {
        query = query.filter(manufacturer::name.ilike(contains_pattern(value)));
    }
    Ok(query.get_result::<i64>(conn).await?)
}

/// ## Summary
/// Loads one page of manufacturers, narrowed by `name_filter` when given.
///
/// ## Errors
/// Returns an error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    name_filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> DbResult<Vec<Manufacturer>> {
    let mut query = manufacturer::table
        .select(Manufacturer::as_select())
        .into_boxed();
    if let Some(value) = name_filter {
        query = query.filter(manufacturer::name.ilike(contains_pattern(value)));
    }
    Ok(query
        .order((manufacturer::name.asc(), manufacturer::id.asc()))
        .limit(limit)
        .offset(offset)
        .load::<Manufacturer>(conn)
        .await?)
}

/// ## Summary
/// Loads every manufacturer in default order.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn all(conn: &mut DbConnection<'_>) -> DbResult<Vec<Manufacturer>> {
    Ok(manufacturer::table
        .select(Manufacturer::as_select())
        .order((manufacturer::name.asc(), manufacturer::id.asc()))
        .load::<Manufacturer>(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<Option<Manufacturer>> {
    Ok(manufacturer::table
        .find(id)
        .select(Manufacturer::as_select())
        .first::<Manufacturer>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Returns whether another manufacturer (not `except`) already uses `name`.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn name_taken(
    conn: &mut DbConnection<'_>,
    name: &str,
    except: Option<uuid::Uuid>,
) -> DbResult<bool> {
    let mut query = manufacturer::table
        .filter(manufacturer::name.eq(name))
        .select(manufacturer::id)
        .into_boxed();
    if let Some(id) = except {
        query = query.filter(manufacturer::id.ne(id));
    }
    Ok(query
        .first::<uuid::Uuid>(conn)
        .await
        .optional()?
        .is_some())
}

/// ## Errors
/// Returns an error if the insert fails, including unique violations.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    new_manufacturer: &NewManufacturer<'_>,
) -> DbResult<Manufacturer> {
    Ok(diesel::insert_into(manufacturer::table)
        .values(new_manufacturer)
        .returning(Manufacturer::as_select())
        .get_result::<Manufacturer>(conn)
        .await?)
}

/// ## Summary
/// Updates a manufacturer, returning `None` if it does not exist.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &ManufacturerChangeset<'_>,
) -> DbResult<Option<Manufacturer>> {
    Ok(diesel::update(manufacturer::table.find(id))
        .set(changes)
        .returning(Manufacturer::as_select())
        .get_result::<Manufacturer>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Deletes a manufacturer and, through the foreign key, its cars.
/// Returns the number of manufacturer rows removed.
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<usize> {
    Ok(diesel::delete(manufacturer::table.find(id))
        .execute(conn)
        .await?)
}

//! Car queries. Cars are always loaded together with their manufacturer;
//! default order is by model.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::{
    db::{
        connection::DbConnection,
        query::text_match::contains_pattern,
        schema::{car, car_driver, driver, manufacturer},
    },
    error::DbResult,
    model::{
        car::{Car, CarChangeset, CarWithManufacturer, NewCar, NewCarDriver},
        driver::Driver,
        manufacturer::Manufacturer,
    },
};

/// ## Summary
/// Counts cars whose model contains `model_filter`, or all of them.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn count(conn: &mut DbConnection<'_>, model_filter: Option<&str>) -> DbResult<i64> {
    let mut query = car::table.select(diesel::dsl::count_star()).into_boxed();
    if let Some(value) = model_filter {
        query = query.filter(car::model.ilike(contains_pattern(value)));
    }
    Ok(query.get_result::<i64>(conn).await?)
}

/// ## Summary
/// Loads one page of cars with their manufacturers, narrowed by
/// `model_filter` when given.
///
/// ## Errors
/// Returns an error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    model_filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> DbResult<Vec<CarWithManufacturer>> {
    let mut query = car::table
        .inner_join(manufacturer::table)
        .select((Car::as_select(), Manufacturer::as_select()))
        .into_boxed();
    if let Some(value) = model_filter {
        query = query.filter(car::model.ilike(contains_pattern(value)));
    }
    let rows = query
        .order((car::model.asc(), car::id.asc()))
        .limit(limit)
        .offset(offset)
        .load::<(Car, Manufacturer)>(conn)
        .await?;

    Ok(rows.into_iter().map(CarWithManufacturer::from).collect())
}

/// ## Errors
/// Returns an error if the query fails.
pub async fn find(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> DbResult<Option<CarWithManufacturer>> {
    Ok(car::table
        .inner_join(manufacturer::table)
        .filter(car::id.eq(id))
        .select((Car::as_select(), Manufacturer::as_select()))
        .first::<(Car, Manufacturer)>(conn)
        .await
        .optional()?
        .map(CarWithManufacturer::from))
}

/// ## Summary
/// Loads the cars a driver is assigned to.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn for_driver(
    conn: &mut DbConnection<'_>,
    driver_id: uuid::Uuid,
) -> DbResult<Vec<CarWithManufacturer>> {
    let assigned = car_driver::table
        .filter(car_driver::driver_id.eq(driver_id))
        .select(car_driver::car_id);

    let rows = car::table
        .inner_join(manufacturer::table)
        .filter(car::id.eq_any(assigned))
        .select((Car::as_select(), Manufacturer::as_select()))
        .order((car::model.asc(), car::id.asc()))
        .load::<(Car, Manufacturer)>(conn)
        .await?;

    Ok(rows.into_iter().map(CarWithManufacturer::from).collect())
}

/// ## Summary
/// Loads the drivers assigned to a car, ordered by username.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn drivers(conn: &mut DbConnection<'_>, car_id: uuid::Uuid) -> DbResult<Vec<Driver>> {
    let assigned = car_driver::table
        .filter(car_driver::car_id.eq(car_id))
        .select(car_driver::driver_id);

    Ok(driver::table
        .filter(driver::id.eq_any(assigned))
        .select(Driver::as_select())
        .order(driver::username.asc())
        .load::<Driver>(conn)
        .await?)
}

/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_car: &NewCar<'_>) -> DbResult<Car> {
    Ok(diesel::insert_into(car::table)
        .values(new_car)
        .returning(Car::as_select())
        .get_result::<Car>(conn)
        .await?)
}

/// ## Summary
/// Updates a car, returning `None` if it does not exist.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &CarChangeset<'_>,
) -> DbResult<Option<Car>> {
    Ok(diesel::update(car::table.find(id))
        .set(changes)
        .returning(Car::as_select())
        .get_result::<Car>(conn)
        .await
        .optional()?)
}

/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<usize> {
    Ok(diesel::delete(car::table.find(id)).execute(conn).await?)
}

/// ## Summary
/// Replaces the set of drivers assigned to a car.
///
/// ## Errors
/// Returns an error if either statement fails. Callers should run this in a
/// transaction.
pub async fn set_drivers(
    conn: &mut DbConnection<'_>,
    car_id: uuid::Uuid,
    driver_ids: &[uuid::Uuid],
) -> DbResult<()> {
    diesel::delete(car_driver::table.filter(car_driver::car_id.eq(car_id)))
        .execute(conn)
        .await?;

    if driver_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewCarDriver> = driver_ids
        .iter()
        .map(|&driver_id| NewCarDriver { car_id, driver_id })
        .collect();

    diesel::insert_into(car_driver::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;

    Ok(())
}

/// ## Summary
/// Assigns the driver to the car, or unassigns them if already assigned.
/// Returns whether the driver is assigned afterwards.
///
/// ## Errors
/// Returns an error if the statements fail.
pub async fn toggle_driver(
    conn: &mut DbConnection<'_>,
    car_id: uuid::Uuid,
    driver_id: uuid::Uuid,
) -> DbResult<bool> {
    let removed = diesel::delete(car_driver::table.find((car_id, driver_id)))
        .execute(conn)
        .await?;

    if removed > 0 {
        return Ok(false);
    }

    diesel::insert_into(car_driver::table)
        .values(&NewCarDriver { car_id, driver_id })
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;

    Ok(true)
}

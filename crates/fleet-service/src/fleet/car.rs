//! Car detail, mutations and driver assignment.

use diesel_async::{AsyncConnection, scoped_futures::ScopedFutureExt};
use fleet_db::{
    db::{connection::DbConnection, query},
    model::{
        car::{CarChangeset, CarWithManufacturer, NewCar},
        driver::Driver,
    },
};
use serde::Serialize;

use crate::{
    error::{ServiceError, ServiceResult},
    form::{
        Form, FormErrors, INVALID_CHOICE_MESSAGE,
        car::{CarData, CarForm},
    },
};

/// A car with its manufacturer and assigned drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: CarWithManufacturer,
    pub drivers: Vec<Driver>,
}

/// ## Summary
/// Loads a car with its manufacturer and drivers.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(conn))]
pub async fn get(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<CarDetail> {
    let car = query::car::find(conn, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("car {id}")))?;
    let drivers = query::car::drivers(conn, id).await?;

    Ok(CarDetail { car, drivers })
}

/// Checks the referenced manufacturer and drivers exist.
async fn check_references(conn: &mut DbConnection<'_>, data: &CarData) -> ServiceResult<()> {
    let mut errors = FormErrors::new();

    if query::manufacturer::find(conn, data.manufacturer_id)
        .await?
        .is_none()
    {
        errors.add("manufacturer", INVALID_CHOICE_MESSAGE);
    }

    let found = query::driver::count_existing(conn, &data.driver_ids).await?;
    if usize::try_from(found).ok() != Some(data.driver_ids.len()) {
        errors.add("drivers", INVALID_CHOICE_MESSAGE);
    }

    errors.into_result(()).map_err(ServiceError::InvalidForm)
}

/// ## Summary
/// Validates the form and creates a car with its driver assignments.
///
/// ## Side Effects
/// Inserts the car and its `car_driver` rows in one transaction.
///
/// ## Errors
/// Returns `InvalidForm` for bad input or unknown manufacturer/driver ids.
#[tracing::instrument(skip(conn))]
pub async fn create(conn: &mut DbConnection<'_>, form: &CarForm) -> ServiceResult<CarDetail> {
    let data = form.clean().map_err(ServiceError::InvalidForm)?;

    let car_id = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                check_references(tx, &data).await?;

                let car = query::car::insert(
                    tx,
                    &NewCar {
                        id: uuid::Uuid::now_v7(),
                        model: &data.model,
                        manufacturer_id: data.manufacturer_id,
                    },
                )
                .await?;
                query::car::set_drivers(tx, car.id, &data.driver_ids).await?;

                Ok(car.id)
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(car_id = %car_id, "Car created");

    get(conn, car_id).await
}

/// ## Summary
/// Validates the form and rewrites a car and its driver assignments.
///
/// ## Errors
/// Returns `NotFound` for an unknown id, `InvalidForm` for bad input.
#[tracing::instrument(skip(conn))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    form: &CarForm,
) -> ServiceResult<CarDetail> {
    let data = form.clean().map_err(ServiceError::InvalidForm)?;

    conn.transaction::<_, ServiceError, _>(move |tx| {
        async move {
            check_references(tx, &data).await?;

            query::car::update(
                tx,
                id,
                &CarChangeset {
                    model: &data.model,
                    manufacturer_id: data.manufacturer_id,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("car {id}")))?;
            query::car::set_drivers(tx, id, &data.driver_ids).await?;

            Ok(())
        }
        .scope_boxed()
    })
    .await?;

    get(conn, id).await
}

/// ## Summary
/// Deletes a car and its assignments.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if query::car::delete(conn, id).await? == 0 {
        return Err(ServiceError::NotFound(format!("car {id}")));
    }
    tracing::info!(car_id = %id, "Car deleted");
    Ok(())
}

/// ## Summary
/// Assigns `driver_id` to the car, or removes the assignment if present.
/// Returns whether the driver is assigned afterwards.
///
/// ## Errors
/// Returns `NotFound` for an unknown car.
#[tracing::instrument(skip(conn))]
pub async fn toggle_assignment(
    conn: &mut DbConnection<'_>,
    car_id: uuid::Uuid,
    driver_id: uuid::Uuid,
) -> ServiceResult<bool> {
    conn.transaction::<_, ServiceError, _>(move |tx| {
        async move {
            if query::car::find(tx, car_id).await?.is_none() {
                return Err(ServiceError::NotFound(format!("car {car_id}")));
            }
            Ok(query::car::toggle_driver(tx, car_id, driver_id).await?)
        }
        .scope_boxed()
    })
    .await
}

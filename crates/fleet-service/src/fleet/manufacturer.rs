//! Manufacturer mutations.

use fleet_db::{
    db::{connection::DbConnection, query},
    model::manufacturer::{Manufacturer, ManufacturerChangeset, NewManufacturer},
};

use crate::{
    error::{ServiceError, ServiceResult, UniqueField},
    form::{Form, manufacturer::ManufacturerForm},
};

pub const NAME_TAKEN: UniqueField = UniqueField {
    constraint: "manufacturer_name_key",
    field: "name",
    message: "Manufacturer with this Name already exists.",
};

/// ## Summary
/// Loads one manufacturer.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
pub async fn get(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<Manufacturer> {
    query::manufacturer::find(conn, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("manufacturer {id}")))
}

/// ## Summary
/// Validates the form and inserts a manufacturer.
///
/// ## Errors
/// Returns `InvalidForm` for bad input or a duplicate name.
#[tracing::instrument(skip(conn))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    form: &ManufacturerForm,
) -> ServiceResult<Manufacturer> {
    let data = form.clean().map_err(ServiceError::InvalidForm)?;
    if query::manufacturer::name_taken(conn, &data.name, None).await? {
        return Err(NAME_TAKEN.taken());
    }

    let manufacturer = query::manufacturer::insert(
        conn,
        &NewManufacturer {
            id: uuid::Uuid::now_v7(),
            name: &data.name,
            country: &data.country,
        },
    )
    .await
    .map_err(|e| ServiceError::from_unique_violation(e, &[NAME_TAKEN]))?;

    tracing::info!(manufacturer_id = %manufacturer.id, "Manufacturer created");

    Ok(manufacturer)
}

/// ## Summary
/// Validates the form and rewrites an existing manufacturer.
///
/// ## Errors
/// Returns `NotFound` for an unknown id, `InvalidForm` for bad input or a
/// name used by another manufacturer.
#[tracing::instrument(skip(conn))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    form: &ManufacturerForm,
) -> ServiceResult<Manufacturer> {
    let data = form.clean().map_err(ServiceError::InvalidForm)?;
    if query::manufacturer::name_taken(conn, &data.name, Some(id)).await? {
        return Err(NAME_TAKEN.taken());
    }

    query::manufacturer::update(
        conn,
        id,
        &ManufacturerChangeset {
            name: &data.name,
            country: &data.country,
        },
    )
    .await
    .map_err(|e| ServiceError::from_unique_violation(e, &[NAME_TAKEN]))?
    .ok_or_else(|| ServiceError::NotFound(format!("manufacturer {id}")))
}

/// ## Summary
/// Deletes a manufacturer together with its cars.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if query::manufacturer::delete(conn, id).await? == 0 {
        return Err(ServiceError::NotFound(format!("manufacturer {id}")));
    }
    tracing::info!(manufacturer_id = %id, "Manufacturer deleted");
    Ok(())
}

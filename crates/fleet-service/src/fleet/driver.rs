//! Driver accounts.
//!
//! Usernames and license numbers are unique. Both are checked before the
//! insert so the caller gets field errors, and the unique indexes catch any
//! concurrent registration that slips between the check and the insert.

use diesel_async::{AsyncConnection, scoped_futures::ScopedFutureExt};
use fleet_core::validation::{validate_license_number, validate_username};
use fleet_db::{
    db::{connection::DbConnection, query},
    model::{
        car::CarWithManufacturer,
        driver::{Driver, NewDriver},
    },
};
use serde::Serialize;

use crate::{
    auth::password::hash_password,
    error::{ServiceError, ServiceResult, UniqueField},
    form::{
        Form, FormErrors,
        driver::{DriverCreationForm, DriverLicenseUpdateForm},
    },
};

pub const USERNAME_TAKEN: UniqueField = UniqueField {
    constraint: "driver_username_key",
    field: "username",
    message: "A user with that username already exists.",
};

pub const LICENSE_NUMBER_TAKEN: UniqueField = UniqueField {
    constraint: "driver_license_number_key",
    field: "license_number",
    message: "Driver with this License number already exists.",
};

/// Everything needed to open an account. The password is plain text and is
/// hashed before it reaches the store.
#[derive(Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub license_number: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("license_number", &self.license_number)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .finish_non_exhaustive()
    }
}

impl From<DriverCreationForm> for NewAccount {
    fn from(form: DriverCreationForm) -> Self {
        Self {
            username: form.username,
            password: form.password1,
            first_name: form.first_name,
            last_name: form.last_name,
            license_number: Some(form.license_number),
            ..Self::default()
        }
    }
}

/// A driver with the cars assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: Driver,
    pub absolute_url: String,
    pub cars: Vec<CarWithManufacturer>,
}

fn check_account(account: &NewAccount) -> ServiceResult<()> {
    let mut errors = FormErrors::new();
    if let Err(err) = validate_username(&account.username) {
        errors.add("username", err.to_string());
    }
    if let Some(license_number) = &account.license_number
        && let Err(err) = validate_license_number(license_number)
    {
        errors.add("license_number", err.to_string());
    }
    errors.into_result(()).map_err(ServiceError::InvalidForm)
}

/// ## Summary
/// Creates an account after checking username and license number are free.
///
/// ## Side Effects
/// Inserts a driver row.
///
/// ## Errors
/// Returns `InvalidForm` for a malformed or taken username or license number.
#[tracing::instrument(skip(conn))]
pub async fn create_user(conn: &mut DbConnection<'_>, account: NewAccount) -> ServiceResult<Driver> {
    check_account(&account)?;
    let password_hash = hash_password(&account.password)?;

    let driver = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                let mut errors = FormErrors::new();
                if query::driver::username_taken(tx, &account.username).await? {
                    errors.add(USERNAME_TAKEN.field, USERNAME_TAKEN.message);
                }
                if let Some(license_number) = &account.license_number
                    && query::driver::license_number_taken(tx, license_number, None).await?
                {
                    errors.add(LICENSE_NUMBER_TAKEN.field, LICENSE_NUMBER_TAKEN.message);
                }
                errors.into_result(()).map_err(ServiceError::InvalidForm)?;

                query::driver::insert(
                    tx,
                    &NewDriver {
                        id: uuid::Uuid::now_v7(),
                        username: &account.username,
                        password_hash: &password_hash,
                        first_name: &account.first_name,
                        last_name: &account.last_name,
                        email: &account.email,
                        license_number: account.license_number.as_deref(),
                        is_staff: account.is_staff,
                        is_superuser: account.is_superuser,
                    },
                )
                .await
                .map_err(|e| {
                    ServiceError::from_unique_violation(e, &[USERNAME_TAKEN, LICENSE_NUMBER_TAKEN])
                })
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(driver_id = %driver.id, "Driver created");

    Ok(driver)
}

/// ## Summary
/// Creates a staff account with every permission.
///
/// ## Errors
/// Returns `InvalidForm` for a bad or taken username.
pub async fn create_superuser(
    conn: &mut DbConnection<'_>,
    username: &str,
    email: &str,
    password: &str,
) -> ServiceResult<Driver> {
    create_user(
        conn,
        NewAccount {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            is_staff: true,
            is_superuser: true,
            ..NewAccount::default()
        },
    )
    .await
}

/// ## Summary
/// Validates the creation form and opens the account.
///
/// ## Errors
/// Returns `InvalidForm` with field errors; nothing is stored in that case.
pub async fn register(
    conn: &mut DbConnection<'_>,
    form: &DriverCreationForm,
) -> ServiceResult<Driver> {
    let cleaned = form.clean().map_err(ServiceError::InvalidForm)?;
    create_user(conn, NewAccount::from(cleaned)).await
}

/// ## Summary
/// Loads a driver with their assigned cars.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(conn))]
pub async fn get(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<DriverDetail> {
    let driver = find(conn, id).await?;
    let cars = query::car::for_driver(conn, id).await?;

    Ok(DriverDetail {
        absolute_url: driver.absolute_url(),
        driver,
        cars,
    })
}

/// ## Errors
/// Returns `NotFound` for an unknown id.
pub async fn find(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<Driver> {
    query::driver::find(conn, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("driver {id}")))
}

/// ## Summary
/// Every driver in username order, for the administrative browser.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn all(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<Driver>> {
    Ok(query::driver::all(conn).await?)
}

/// ## Summary
/// Replaces a driver's license number.
///
/// ## Errors
/// Returns `NotFound` for an unknown id, `InvalidForm` for a malformed number
/// or one held by another driver.
#[tracing::instrument(skip(conn))]
pub async fn update_license(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    form: &DriverLicenseUpdateForm,
) -> ServiceResult<Driver> {
    let license_number = form.clean().map_err(ServiceError::InvalidForm)?;
    if query::driver::license_number_taken(conn, &license_number, Some(id)).await? {
        return Err(LICENSE_NUMBER_TAKEN.taken());
    }

    query::driver::update_license_number(conn, id, &license_number)
        .await
        .map_err(|e| ServiceError::from_unique_violation(e, &[LICENSE_NUMBER_TAKEN]))?
        .ok_or_else(|| ServiceError::NotFound(format!("driver {id}")))
}

/// ## Summary
/// Deletes a driver with their sessions and assignments.
///
/// ## Errors
/// Returns `NotFound` for an unknown id.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    if query::driver::delete(conn, id).await? == 0 {
        return Err(ServiceError::NotFound(format!("driver {id}")));
    }
    tracing::info!(driver_id = %id, "Driver deleted");
    Ok(())
}

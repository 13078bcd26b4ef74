//! Depot helpers for reading the authenticated driver from Salvo requests.

use fleet_db::{depot_types::DepotUser, model::driver::Driver};

use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_DRIVER: &str = "__authenticated_driver";
    pub const SESSION_TOKEN: &str = "__session_token";
}

/// Get the authenticated driver from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if no driver is found in the depot or the request is anonymous.
pub fn get_driver_from_depot(depot: &salvo::Depot) -> ServiceResult<&Driver> {
    let depot_user = depot
        .get::<DepotUser>(depot_keys::AUTHENTICATED_DRIVER)
        .map_err(|_e| ServiceError::NotAuthenticated)?;

    depot_user.driver().ok_or(ServiceError::NotAuthenticated)
}

/// Check if the request is from an authenticated driver.
#[must_use]
pub fn is_authenticated(depot: &salvo::Depot) -> bool {
    get_driver_from_depot(depot).is_ok()
}

/// Check if the request is from an active staff account.
#[must_use]
pub fn is_staff(depot: &salvo::Depot) -> bool {
    get_driver_from_depot(depot).is_ok_and(|driver| driver.is_active && driver.is_staff)
}

/// The session token the request authenticated with, if any.
#[must_use]
pub fn get_session_token_from_depot(depot: &salvo::Depot) -> Option<uuid::Uuid> {
    depot
        .get::<uuid::Uuid>(depot_keys::SESSION_TOKEN)
        .ok()
        .copied()
}

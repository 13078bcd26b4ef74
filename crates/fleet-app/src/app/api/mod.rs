pub mod accounts;
pub mod admin;
pub mod cars;
pub mod context;
pub mod drivers;
pub mod healthcheck;
pub mod index;
pub mod manufacturers;

use salvo::Router;

use crate::middleware::{AuthMiddleware, LoginRequired};

pub use fleet_core::constants::{
    ACCOUNTS_ROUTE_COMPONENT, ADMIN_ROUTE_COMPONENT, CARS_ROUTE_COMPONENT,
    DRIVERS_ROUTE_COMPONENT, LOGIN_URL, MANUFACTURERS_ROUTE_COMPONENT,
};

/// ## Summary
/// Constructs the page router. Everything except the health check, the login
/// pages and the admin browser requires a logged-in driver.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .hoop(AuthMiddleware)
        .push(healthcheck::routes())
        .push(accounts::routes())
        .push(admin::routes())
        .push(
            Router::new()
                .hoop(LoginRequired {
                    login_url: LOGIN_URL,
                })
                .push(index::routes())
                .push(manufacturers::routes())
                .push(cars::routes())
                .push(drivers::routes()),
        )
}

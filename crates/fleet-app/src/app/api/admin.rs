//! Administrative record browser for driver accounts.
//!
//! Shows every stored driver field except the password hash. Staff only.

use salvo::{Depot, Request, Response, Router, handler, writing::Json};

use super::{accounts, context::path_id};
use crate::{
    db_handler::{connect, get_db_from_depot},
    error::AppResult,
    middleware::StaffRequired,
};
use fleet_core::constants::{ADMIN_LOGIN_URL, ADMIN_ROUTE_COMPONENT};
use fleet_service::fleet::driver;

/// Columns shown on the change list, in order.
pub const DRIVER_LIST_DISPLAY: &[&str] = &[
    "username",
    "email",
    "first_name",
    "last_name",
    "is_staff",
    "license_number",
];

/// ## Summary
/// GET /admin/taxi/driver/ - Every driver with all persisted fields.
#[handler]
async fn driver_changelist(depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let drivers = driver::all(&mut conn).await?;
    res.render(Json(serde_json::json!({
        "model": "driver",
        "list_display": DRIVER_LIST_DISPLAY,
        "result_count": drivers.len(),
        "results": drivers,
    })));
    Ok(())
}

/// ## Summary
/// GET /admin/taxi/driver/{id}/change/ - One driver with all persisted fields.
#[handler]
async fn driver_change(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let original = driver::find(&mut conn, id).await?;
    res.render(Json(serde_json::json!({
        "model": "driver",
        "original": original,
    })));
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ADMIN_ROUTE_COMPONENT)
        .push(
            Router::with_path("login")
                .get(accounts::login_page)
                .post(accounts::login),
        )
        .push(
            Router::with_path("taxi/driver")
                .hoop(StaffRequired {
                    login_url: ADMIN_LOGIN_URL,
                })
                .get(driver_changelist)
                .push(Router::with_path("{id}/change").get(driver_change)),
        )
}

use salvo::{Depot, Request, Response, Router, handler, writing::Json};

use super::context::{bind_form, path_id, redirect, with_form};
use crate::{
    config::get_config_from_depot,
    db_handler::{connect, get_db_from_depot},
    error::AppResult,
};
use fleet_core::constants::{DRIVERS_ROUTE_COMPONENT, DRIVERS_ROUTE_PREFIX};
use fleet_service::{
    fleet::{PageRequest, driver, listing},
    form::{
        driver::{DriverCreationForm, DriverLicenseUpdateForm},
        search::DriverSearchForm,
    },
};

const SUCCESS_URL: &str = const_str::concat!(DRIVERS_ROUTE_PREFIX, "/");

/// ## Summary
/// GET /drivers/ - Paginated driver list, narrowed by `?username=`.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let form = DriverSearchForm::new(req.query::<String>("username"));
    let page = PageRequest::parse(req.query::<String>("page").as_deref())?;
    let settings = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let context = listing::drivers(&mut conn, &form, page, settings.listing.paginate_by).await?;
    res.render(Json(context));
    Ok(())
}

/// ## Summary
/// GET /drivers/{id}/ - One driver with assigned cars.
#[handler]
async fn detail(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let driver = driver::get(&mut conn, id).await?;
    res.render(Json(serde_json::json!({ "driver": driver })));
    Ok(())
}

/// ## Summary
/// POST /drivers/create/ - Opens an account from `DriverCreationForm` and
/// redirects to the new driver's page.
///
/// ## Errors
/// Returns 400 with the form (passwords omitted) when validation fails.
#[handler]
async fn create(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let form = bind_form::<DriverCreationForm>(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let created = driver::register(&mut conn, &form)
        .await
        .map_err(with_form(&form))?;
    redirect(res, &created.absolute_url())
}

/// ## Summary
/// POST /drivers/{id}/update/ - Replaces the driver's license number.
#[handler]
async fn update(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let form = bind_form::<DriverLicenseUpdateForm>(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    driver::update_license(&mut conn, id, &form)
        .await
        .map_err(with_form(&form))?;
    redirect(res, SUCCESS_URL)
}

/// ## Summary
/// POST /drivers/{id}/delete/ - Deletes a driver account.
#[handler]
async fn delete(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    driver::delete(&mut conn, id).await?;
    redirect(res, SUCCESS_URL)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(DRIVERS_ROUTE_COMPONENT)
        .get(list)
        .push(Router::with_path("create").post(create))
        .push(
            Router::with_path("{id}")
                .get(detail)
                .push(Router::with_path("update").post(update))
                .push(Router::with_path("delete").post(delete)),
        )
}

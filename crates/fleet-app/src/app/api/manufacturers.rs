use salvo::{Depot, Request, Response, Router, handler, writing::Json};

use super::context::{bind_form, path_id, redirect, with_form};
use crate::{
    config::get_config_from_depot,
    db_handler::{connect, get_db_from_depot},
    error::AppResult,
};
use fleet_core::constants::{MANUFACTURERS_ROUTE_COMPONENT, MANUFACTURERS_ROUTE_PREFIX};
use fleet_service::{
    fleet::{PageRequest, listing, manufacturer},
    form::{manufacturer::ManufacturerForm, search::ManufacturerSearchForm},
};

const SUCCESS_URL: &str = const_str::concat!(MANUFACTURERS_ROUTE_PREFIX, "/");

/// ## Summary
/// GET /manufacturers/ - Paginated manufacturer list, narrowed by `?name=`.
///
/// ## Errors
/// Returns 404 for an invalid or out-of-range `?page=`.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let form = ManufacturerSearchForm::new(req.query::<String>("name"));
    let page = PageRequest::parse(req.query::<String>("page").as_deref())?;
    let settings = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let context =
        listing::manufacturers(&mut conn, &form, page, settings.listing.paginate_by).await?;
    res.render(Json(context));
    Ok(())
}

/// ## Summary
/// POST /manufacturers/create/ - Creates a manufacturer and redirects to the list.
#[handler]
async fn create(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let form = bind_form::<ManufacturerForm>(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    manufacturer::create(&mut conn, &form)
        .await
        .map_err(with_form(&form))?;
    redirect(res, SUCCESS_URL)
}

/// ## Summary
/// POST /manufacturers/{id}/update/ - Rewrites a manufacturer.
#[handler]
async fn update(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let form = bind_form::<ManufacturerForm>(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    manufacturer::update(&mut conn, id, &form)
        .await
        .map_err(with_form(&form))?;
    redirect(res, SUCCESS_URL)
}

/// ## Summary
/// POST /manufacturers/{id}/delete/ - Deletes a manufacturer and its cars.
#[handler]
async fn delete(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    manufacturer::delete(&mut conn, id).await?;
    redirect(res, SUCCESS_URL)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(MANUFACTURERS_ROUTE_COMPONENT)
        .get(list)
        .push(Router::with_path("create").post(create))
        .push(
            Router::with_path("{id}")
                .push(Router::with_path("update").post(update))
                .push(Router::with_path("delete").post(delete)),
        )
}

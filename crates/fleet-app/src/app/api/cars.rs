use salvo::{Depot, Request, Response, Router, handler, writing::Json};

use super::context::{bind_form, path_id, redirect, with_form};
use crate::{
    config::get_config_from_depot,
    db_handler::{connect, get_db_from_depot},
    error::AppResult,
};
use fleet_core::constants::{CARS_ROUTE_COMPONENT, CARS_ROUTE_PREFIX};
use fleet_service::{
    auth::get_driver_from_depot,
    fleet::{PageRequest, car, listing},
    form::{car::CarForm, search::CarSearchForm},
};

const SUCCESS_URL: &str = const_str::concat!(CARS_ROUTE_PREFIX, "/");

fn detail_url(id: uuid::Uuid) -> String {
    format!("{CARS_ROUTE_PREFIX}/{id}/")
}

/// ## Summary
/// GET /cars/ - Paginated car list with manufacturers, narrowed by `?model=`.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let form = CarSearchForm::new(req.query::<String>("model"));
    let page = PageRequest::parse(req.query::<String>("page").as_deref())?;
    let settings = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let context = listing::cars(&mut conn, &form, page, settings.listing.paginate_by).await?;
    res.render(Json(context));
    Ok(())
}

/// ## Summary
/// GET /cars/{id}/ - One car with its manufacturer and drivers.
#[handler]
async fn detail(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let car = car::get(&mut conn, id).await?;
    res.render(Json(serde_json::json!({ "car": car })));
    Ok(())
}

/// ## Summary
/// POST /cars/create/ - Creates a car with its driver assignments.
#[handler]
async fn create(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let form = bind_form::<CarForm>(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    car::create(&mut conn, &form)
        .await
        .map_err(with_form(&form))?;
    redirect(res, SUCCESS_URL)
}

/// ## Summary
/// POST /cars/{id}/update/ - Rewrites a car and its driver assignments.
#[handler]
async fn update(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let form = bind_form::<CarForm>(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    car::update(&mut conn, id, &form)
        .await
        .map_err(with_form(&form))?;
    redirect(res, SUCCESS_URL)
}

/// ## Summary
/// POST /cars/{id}/delete/ - Deletes a car.
#[handler]
async fn delete(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    car::delete(&mut conn, id).await?;
    redirect(res, SUCCESS_URL)
}

/// ## Summary
/// POST /cars/{id}/toggle-assign/ - Adds the current driver to the car, or
/// removes them if already assigned, then returns to the car page.
#[handler]
async fn toggle_assign(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<()> {
    let id = path_id(req)?;
    let driver_id = get_driver_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let assigned = car::toggle_assignment(&mut conn, id, driver_id).await?;
    tracing::debug!(car_id = %id, driver_id = %driver_id, assigned, "Toggled car assignment");
    redirect(res, &detail_url(id))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CARS_ROUTE_COMPONENT)
        .get(list)
        .push(Router::with_path("create").post(create))
        .push(
            Router::with_path("{id}")
                .get(detail)
                .push(Router::with_path("update").post(update))
                .push(Router::with_path("delete").post(delete))
                .push(Router::with_path("toggle-assign").post(toggle_assign)),
        )
}

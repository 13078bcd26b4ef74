use salvo::{Depot, Response, Router, handler, writing::Json};

use crate::{
    db_handler::{connect, get_db_from_depot},
    error::AppResult,
};
use fleet_service::{auth::get_driver_from_depot, fleet::summary};

/// ## Summary
/// GET / - Landing summary with record counts and the caller's visit count.
///
/// ## Side Effects
/// Increments the driver's visit counter.
#[handler]
async fn index(depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let driver_id = get_driver_from_depot(depot)?.id;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let context = summary::record_visit(&mut conn, driver_id).await?;
    res.render(Json(context));
    Ok(())
}

#[must_use]
pub fn routes() -> Router {
    Router::new().get(index)
}

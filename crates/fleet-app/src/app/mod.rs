pub mod api;

use salvo::Router;

use crate::{config::ConfigHandler, db_handler::DbProviderHandler};
use fleet_core::config::Settings;
use fleet_db::db::DbProvider;

/// ## Summary
/// Builds the full application router: depot injection hoops, request
/// logging and every page.
#[must_use]
pub fn router<T>(provider: T, settings: Settings) -> Router
where
    T: DbProvider + Send + Sync + Clone + 'static,
{
    Router::new()
        .hoop(salvo::logging::Logger::new())
        .hoop(DbProviderHandler { provider })
        .hoop(ConfigHandler { settings })
        .push(api::routes())
}

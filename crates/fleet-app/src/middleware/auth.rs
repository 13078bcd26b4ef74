use salvo::Depot;
use tracing::error;

use crate::{db_handler::get_db_from_depot, error::AppError};
use fleet_db::depot_types::DepotUser;
use fleet_service::auth::{
    Credentials, authenticate, credentials_from_request, depot::depot_keys,
};

/// ## Summary
/// Resolves the request's credentials and stores the driver in the depot.
///
/// A session cookie is tried before Basic credentials, so a stale cookie does
/// not shadow a valid `Authorization` header. Requests without credentials, or
/// with credentials that do not match, are
/// stored as `DepotUser::Anonymous`; whether that is acceptable is decided by
/// `LoginRequired` further down. The database is only touched when the request
/// carries credentials.
///
/// ## Side Effects
/// Inserts a `DepotUser` under `depot_keys::AUTHENTICATED_DRIVER`, and the
/// session token under `depot_keys::SESSION_TOKEN` when a session matched.
///
/// ## Errors
/// Responds 500/503 when the database cannot be reached.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let candidates = credentials_from_request(req);
        if candidates.is_empty() {
            depot.insert(depot_keys::AUTHENTICATED_DRIVER, DepotUser::Anonymous);
            return;
        }

        let provider = match get_db_from_depot(depot) {
            Ok(p) => p,
            Err(e) => {
                error!(error = ?e, "Failed to get database provider from depot");
                e.render_into(res);
                ctrl.skip_rest();
                return;
            }
        };

        let mut conn = match provider.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!(error = ?e, "Failed to get database connection");
                AppError::from(e).render_into(res);
                ctrl.skip_rest();
                return;
            }
        };

        for credentials in candidates {
            match authenticate(&mut conn, &credentials).await {
                Ok(Some(driver)) => {
                    tracing::debug!(driver_id = %driver.id, "Driver authenticated");
                    if let Credentials::Session(token) = credentials {
                        depot.insert(depot_keys::SESSION_TOKEN, token);
                    }
                    depot.insert(depot_keys::AUTHENTICATED_DRIVER, DepotUser::Driver(driver));
                    return;
                }
                Ok(None) => {
                    tracing::debug!(?credentials, "Credentials did not match");
                }
                Err(e) => {
                    error!(error = ?e, "Authentication failed with error");
                    AppError::from(e).render_into(res);
                    ctrl.skip_rest();
                    return;
                }
            }
        }

        tracing::debug!("No credentials matched, treating as anonymous");
        depot.insert(depot_keys::AUTHENTICATED_DRIVER, DepotUser::Anonymous);
    }
}

//! Access hoops for protected routes.

use salvo::{Depot, FlowCtrl, Request, Response};

use crate::{app::api::context::redirect, error::AppError};
use fleet_core::util::url::login_redirect;
use fleet_service::{
    auth::{is_authenticated, is_staff},
    error::ServiceError,
};

/// The path and query to come back to after logging in.
fn next_target(req: &Request) -> String {
    req.uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string)
}

fn redirect_to_login(login_url: &str, req: &Request, res: &mut Response, ctrl: &mut FlowCtrl) {
    let target = login_redirect(login_url, &next_target(req));
    tracing::debug!(location = %target, "Redirecting anonymous request to login");
    if let Err(e) = redirect(res, &target) {
        e.render_into(res);
    }
    ctrl.skip_rest();
}

/// Redirects anonymous requests to `login_url?next={path}`.
pub struct LoginRequired {
    pub login_url: &'static str,
}

#[salvo::async_trait]
impl salvo::Handler for LoginRequired {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if !is_authenticated(depot) {
            redirect_to_login(self.login_url, req, res, ctrl);
        }
    }
}

/// Admits active staff accounts only. Anonymous requests are sent to
/// `login_url`; other drivers get 403.
pub struct StaffRequired {
    pub login_url: &'static str,
}

#[salvo::async_trait]
impl salvo::Handler for StaffRequired {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if !is_authenticated(depot) {
            redirect_to_login(self.login_url, req, res, ctrl);
        } else if !is_staff(depot) {
            tracing::debug!("Rejecting non-staff driver");
            AppError::from(ServiceError::PermissionDenied(
                "You don't have permission to view or edit anything.".to_string(),
            ))
            .render_into(res);
            ctrl.skip_rest();
        }
    }
}

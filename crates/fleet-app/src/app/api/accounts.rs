//! Login and logout pages.

use salvo::{
    Depot, Request, Response, Router, handler,
    http::cookie::{Cookie, SameSite},
    writing::Json,
};

use super::context::{bind_form, redirect, with_form};
use crate::{
    config::get_config_from_depot,
    db_handler::{connect, get_db_from_depot},
    error::{AppError, AppResult},
};
use fleet_core::{
    constants::{
        ACCOUNTS_ROUTE_COMPONENT, LOGIN_URL, REDIRECT_FIELD_NAME, SESSION_COOKIE_NAME,
    },
    util::url::safe_redirect_target,
};
use fleet_service::{
    auth::{depot::get_session_token_from_depot, session},
    error::ServiceError,
    form::{Form, login::LoginForm},
};

const DEFAULT_REDIRECT: &str = "/";

/// ## Summary
/// GET .../login/ - The empty login form, carrying `?next=` through.
#[handler]
pub async fn login_page(req: &mut Request, res: &mut Response) {
    let form = LoginForm {
        next: req.query::<String>(REDIRECT_FIELD_NAME),
        ..LoginForm::default()
    };
    res.render(Json(serde_json::json!({
        "form": { "name": LoginForm::NAME, "data": form },
    })));
}

/// ## Summary
/// POST .../login/ - Verifies credentials, opens a session and sets the
/// `sessionid` cookie, then redirects to `next` (or `/`).
///
/// ## Errors
/// Returns 400 with a non-field error when the credentials do not match.
#[handler]
pub async fn login(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    let mut form = bind_form::<LoginForm>(req).await?;
    if form.next.is_none() {
        form.next = req.query::<String>(REDIRECT_FIELD_NAME);
    }
    let (username, password) = form
        .clean()
        .map_err(|errors| with_form(&form)(ServiceError::InvalidForm(errors)))?;

    let settings = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = connect(&provider).await?;

    let opened = session::login(&mut conn, &username, &password, settings.auth.session_ttl())
        .await
        .map_err(|err| match err {
            ServiceError::NotAuthenticated => {
                with_form(&form)(ServiceError::InvalidForm(LoginForm::invalid_login()))
            }
            other => AppError::from(other),
        })?;

    res.add_cookie(
        Cookie::build((SESSION_COOKIE_NAME, opened.id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    );

    let target = safe_redirect_target(form.next.as_deref()).unwrap_or(DEFAULT_REDIRECT);
    redirect(res, target)
}

/// ## Summary
/// POST /accounts/logout/ - Ends the session, clears the cookie and returns to
/// the login page.
#[handler]
async fn logout(depot: &mut Depot, res: &mut Response) -> AppResult<()> {
    if let Some(token) = get_session_token_from_depot(depot) {
        let provider = get_db_from_depot(depot)?;
        let mut conn = connect(&provider).await?;
        session::logout(&mut conn, token).await?;
    }

    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    res.add_cookie(cookie);

    redirect(res, LOGIN_URL)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ACCOUNTS_ROUTE_COMPONENT)
        .push(Router::with_path("login").get(login_page).post(login))
        .push(Router::with_path("logout").post(logout))
}

//! Request credential extraction and verification.
//!
//! A request authenticates with the `sessionid` cookie set at login, or with
//! HTTP Basic credentials for non-browser clients. The cookie is tried first;
//! Basic credentials are still used when the cookie names no live session.

use base64::Engine;
use fleet_core::constants::SESSION_COOKIE_NAME;
use fleet_db::{
    db::{connection::DbConnection, query},
    model::driver::Driver,
};

use super::password::check_password;
use crate::error::ServiceResult;

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Session(uuid::Uuid),
    Basic { username: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(_) => f.write_str("Session(..)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// ## Summary
/// Parses an `Authorization: Basic ...` header value into username and password.
#[must_use]
pub fn parse_basic_authorization(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// ## Summary
/// Reads the credentials a request carries, in the order they are tried.
///
/// A session cookie that is not a valid token is ignored.
#[must_use]
pub fn credentials_from_request(req: &salvo::Request) -> Vec<Credentials> {
    let session = req
        .cookie(SESSION_COOKIE_NAME)
        .and_then(|cookie| uuid::Uuid::parse_str(cookie.value()).ok())
        .map(Credentials::Session);

    let basic = req
        .headers()
        .get(salvo::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic_authorization)
        .map(|(username, password)| Credentials::Basic { username, password });

    session.into_iter().chain(basic).collect()
}

/// ## Summary
/// Resolves credentials to an active driver.
///
/// Returns `Ok(None)` when the session is unknown or expired, or the
/// username/password pair does not match.
///
/// ## Errors
/// Returns an error if the database lookup fails.
#[tracing::instrument(skip(conn))]
pub async fn authenticate(
    conn: &mut DbConnection<'_>,
    credentials: &Credentials,
) -> ServiceResult<Option<Driver>> {
    match credentials {
        Credentials::Session(token) => {
            let driver = query::session::find_driver(conn, *token, chrono::Utc::now())
                .await?
                .filter(|driver| driver.is_active);
            tracing::trace!(found = driver.is_some(), "Resolved session cookie");
            Ok(driver)
        }
        Credentials::Basic { username, password } => {
            let driver = query::driver::find_by_username(conn, username)
                .await?
                .filter(|driver| check_password(driver, password));
            tracing::trace!(found = driver.is_some(), "Resolved basic credentials");
            Ok(driver)
        }
    }
}

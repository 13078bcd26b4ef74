//! Account authentication.
//!
//! ## Module Organization
//!
//! - `authenticate`: Resolving request credentials (session cookie, HTTP Basic) to a driver
//! - `depot`: Helpers for reading the authenticated driver from the Salvo depot
//! - `password`: Password hashing and verification with Argon2
//! - `session`: Login and logout against the session table

pub mod authenticate;
pub mod depot;
pub mod password;
pub mod session;

pub use authenticate::{Credentials, authenticate, credentials_from_request};
pub use depot::{get_driver_from_depot, is_authenticated, is_staff};
pub use password::{check_password, hash_password, verify_password};

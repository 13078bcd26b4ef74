pub mod auth;
pub mod error;
pub mod fleet;
pub mod form;

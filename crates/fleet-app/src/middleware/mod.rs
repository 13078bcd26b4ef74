pub mod auth;
pub mod login_required;

pub use auth::AuthMiddleware;
pub use login_required::{LoginRequired, StaffRequired};

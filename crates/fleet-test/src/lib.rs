//! Fleet service integration test support.
//!
//! Re-exports the workspace crates so the HTTP tests under `tests/` reach
//! everything through one path.

pub use fleet_app as app;
pub use fleet_db as db;
pub use fleet_service as service;

pub mod config {
    pub use fleet_core::config::*;
    pub use fleet_core::constants::*;
}

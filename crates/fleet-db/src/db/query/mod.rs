//! Query functions, one module per table.
//!
//! Every listing takes an optional filter value; `None` selects all rows.
//! Callers are responsible for turning empty filter input into `None`.

pub mod car;
pub mod driver;
pub mod manufacturer;
pub mod session;
pub mod text_match;

//! Fleet records: listings, the landing summary and the create/update/delete
//! flows behind the manufacturer, car and driver pages.
//!
//! ## Module Organization
//!
//! - `listing`: Filtered, paginated listings
//! - `summary`: Landing page counts and the per-driver visit counter
//! - `manufacturer`: Manufacturer mutations
//! - `car`: Car detail, mutations and driver assignment
//! - `driver`: Account creation, detail, license update and removal

pub mod car;
pub mod driver;
pub mod listing;
pub mod manufacturer;
pub mod summary;

pub use listing::{ListPage, PageObj, PageRequest, Paginator};
pub use summary::IndexContext;

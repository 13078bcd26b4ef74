pub mod db;
pub mod depot_types;
pub mod error;
pub mod model;

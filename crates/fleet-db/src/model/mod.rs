pub mod car;
pub mod driver;
pub mod manufacturer;
pub mod session;

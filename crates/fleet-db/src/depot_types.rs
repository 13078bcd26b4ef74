use crate::model::driver::Driver;

/// The request's authenticated account, stored in the depot by the
/// authentication middleware.
#[derive(Debug, Clone)]
pub enum DepotUser {
    Driver(Driver),
    Anonymous,
}

impl DepotUser {
    #[must_use]
    pub const fn driver(&self) -> Option<&Driver> {
        match self {
            Self::Driver(driver) => Some(driver),
            Self::Anonymous => None,
        }
    }
}

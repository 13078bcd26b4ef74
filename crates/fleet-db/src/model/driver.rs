use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;
use fleet_core::constants::DRIVERS_ROUTE_PREFIX;

/// A driver is the account type of the service: every login is a driver.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::driver)]
#[diesel(check_for_backend(Pg))]
pub struct Driver {
    pub id: uuid::Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub license_number: Option<String>,
    pub num_visits: i32,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

impl Driver {
    /// ## Summary
    /// Canonical address of the driver's detail page.
    #[must_use]
    pub fn absolute_url(&self) -> String {
        detail_url(self.id)
    }
}

/// ## Summary
/// Detail page address for the driver with `id`.
#[must_use]
pub fn detail_url(id: uuid::Uuid) -> String {
    format!("{DRIVERS_ROUTE_PREFIX}/{id}/")
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.username, self.first_name, self.last_name
        )
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::driver)]
pub struct NewDriver<'a> {
    pub id: uuid::Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub license_number: Option<&'a str>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

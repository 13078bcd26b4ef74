use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::manufacturer)]
#[diesel(check_for_backend(Pg))]
pub struct Manufacturer {
    pub id: uuid::Uuid,
    pub name: String,
    pub country: String,
}

impl std::fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::manufacturer)]
pub struct NewManufacturer<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
    pub country: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::manufacturer)]
pub struct ManufacturerChangeset<'a> {
    pub name: &'a str,
    pub country: &'a str,
}

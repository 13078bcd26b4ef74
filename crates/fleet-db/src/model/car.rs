use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{db::schema, model};

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Identifiable,
    Queryable,
    Selectable,
    Associations,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = schema::car)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(model::manufacturer::Manufacturer, foreign_key = manufacturer_id))]
pub struct Car {
    pub id: uuid::Uuid,
    pub model: String,
    pub manufacturer_id: uuid::Uuid,
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.model)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::car)]
pub struct NewCar<'a> {
    pub id: uuid::Uuid,
    pub model: &'a str,
    pub manufacturer_id: uuid::Uuid,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::car)]
pub struct CarChangeset<'a> {
    pub model: &'a str,
    pub manufacturer_id: uuid::Uuid,
}

/// A car joined with the manufacturer it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarWithManufacturer {
    #[serde(flatten)]
    pub car: Car,
    pub manufacturer: model::manufacturer::Manufacturer,
}

impl From<(Car, model::manufacturer::Manufacturer)> for CarWithManufacturer {
    fn from((car, manufacturer): (Car, model::manufacturer::Manufacturer)) -> Self {
        Self { car, manufacturer }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::car_driver)]
#[diesel(check_for_backend(Pg))]
#[diesel(primary_key(car_id, driver_id))]
#[diesel(belongs_to(Car, foreign_key = car_id))]
#[diesel(belongs_to(model::driver::Driver, foreign_key = driver_id))]
pub struct CarDriver {
    pub car_id: uuid::Uuid,
    pub driver_id: uuid::Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = schema::car_driver)]
pub struct NewCarDriver {
    pub car_id: uuid::Uuid,
    pub driver_id: uuid::Uuid,
}

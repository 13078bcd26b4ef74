use diesel::{pg::Pg, prelude::*};

use crate::{db::schema, model};

/// A login session; `id` is the opaque token stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::session)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(model::driver::Driver, foreign_key = driver_id))]
pub struct Session {
    pub id: uuid::Uuid,
    pub driver_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = schema::session)]
pub struct NewSession {
    pub id: uuid::Uuid,
    pub driver_id: uuid::Uuid,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

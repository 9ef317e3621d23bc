//! Database models for users.

use diesel::prelude::*;
use folioadvisor_core::users::User;
use folioadvisor_core::utils::time_utils::parse_timestamp;
use folioadvisor_core::Result;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserDB> for User {
    type Error = folioadvisor_core::Error;

    fn try_from(db: UserDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            created_at: parse_timestamp(&db.created_at)?,
            updated_at: parse_timestamp(&db.updated_at)?,
        })
    }
}

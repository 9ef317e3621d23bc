use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use folioadvisor_core::users::{NewUser, User, UserRepositoryTrait};
use folioadvisor_core::utils::time_utils::{format_timestamp, now_utc};
use folioadvisor_core::Result;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = format_timestamp(&now_utc());
                let row = NewUserDB {
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    created_at: now.clone(),
                    updated_at: now,
                };
                // A duplicate username surfaces as a unique violation from the
                // column constraint.
                diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .order(users::id.asc())
            .select(UserDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use folioadvisor_core::profiles::{Profile, ProfileData, ProfileRepositoryTrait};
use folioadvisor_core::utils::time_utils::{format_timestamp, now_utc};
use folioadvisor_core::Result;

use super::model::{NewProfileDB, ProfileDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::profiles;

pub struct ProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProfileRepository { pool, writer }
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn upsert_profile(&self, user_id: i64, data: ProfileData) -> Result<Profile> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Profile> {
                let row = NewProfileDB::new(user_id, data, format_timestamp(&now_utc()));
                // The UNIQUE user_id column turns a second insert into an
                // update of the existing row, keeping its id.
                diesel::insert_into(profiles::table)
                    .values(&row)
                    .on_conflict(profiles::user_id)
                    .do_update()
                    .set(&row)
                    .returning(ProfileDB::as_returning())
                    .get_result(conn)
                    .into_core()?
                    .try_into()
            })
            .await
    }

    async fn get_profile(&self, profile_id: i64) -> Result<Option<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        profiles::table
            .find(profile_id)
            .select(ProfileDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Profile::try_from)
            .transpose()
    }

    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        profiles::table
            .filter(profiles::user_id.eq(user_id))
            .select(ProfileDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Profile::try_from)
            .transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        profiles::table
            .order(profiles::id.asc())
            .select(ProfileDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Profile::try_from)
            .collect()
    }
}

//! Database models for profiles.

use diesel::prelude::*;
use folioadvisor_core::errors::{DatabaseError, Error};
use folioadvisor_core::profiles::{Profile, ProfileData};
use folioadvisor_core::utils::time_utils::parse_timestamp;
use folioadvisor_core::Result;
use std::str::FromStr;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileDB {
    pub id: i64,
    pub user_id: i64,
    pub risk_preference: String,
    pub investment_amount: f64,
    pub investment_period: String,
    pub investment_goal: String,
    pub updated_at: String,
}

/// Row written on every save; doubles as the conflict changeset.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfileDB {
    pub user_id: i64,
    pub risk_preference: String,
    pub investment_amount: f64,
    pub investment_period: String,
    pub investment_goal: String,
    pub updated_at: String,
}

impl NewProfileDB {
    pub fn new(user_id: i64, data: ProfileData, updated_at: String) -> Self {
        Self {
            user_id,
            risk_preference: data.risk_preference.as_str().to_string(),
            investment_amount: data.investment_amount,
            investment_period: data.investment_period.as_str().to_string(),
            investment_goal: data.investment_goal.as_str().to_string(),
            updated_at,
        }
    }
}

pub(crate) fn parse_label<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Database(DatabaseError::Corrupt(format!("unknown label '{raw}'"))))
}

impl TryFrom<ProfileDB> for Profile {
    type Error = Error;

    fn try_from(db: ProfileDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            risk_preference: parse_label(&db.risk_preference)?,
            investment_amount: db.investment_amount,
            investment_period: parse_label(&db.investment_period)?,
            investment_goal: parse_label(&db.investment_goal)?,
            updated_at: parse_timestamp(&db.updated_at)?,
        })
    }
}

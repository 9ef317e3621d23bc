//! User domain models.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern is valid"));

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 50;

/// A registered user. The password is only ever held as a salted hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for persisting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Public projection of a user, safe to send to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Credentials submitted at registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<()> {
        let name_len = self.username.chars().count();
        if name_len < USERNAME_MIN_CHARS {
            return Err(Error::invalid("用户名至少3个字符"));
        }
        if name_len > USERNAME_MAX_CHARS {
            return Err(Error::invalid("用户名最多20个字符"));
        }
        if !USERNAME_PATTERN.is_match(&self.username) {
            return Err(Error::invalid("用户名只能包含字母、数字和下划线"));
        }
        let pw_len = self.password.chars().count();
        if pw_len < PASSWORD_MIN_CHARS {
            return Err(Error::invalid("密码至少6个字符"));
        }
        if pw_len > PASSWORD_MAX_CHARS {
            return Err(Error::invalid("密码最多50个字符"));
        }
        Ok(())
    }
}

/// Credentials submitted at login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::invalid("请输入用户名"));
        }
        if self.password.is_empty() {
            return Err(Error::invalid("请输入密码"));
        }
        Ok(())
    }
}

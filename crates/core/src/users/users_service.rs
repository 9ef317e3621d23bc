use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub const USERNAME_TAKEN: &str = "用户名已存在";

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    /// Persists a user whose password has already been hashed.
    async fn register_user(&self, username: &str, password_hash: String) -> Result<User> {
        if self.repository.get_user_by_username(username).await?.is_some() {
            return Err(Error::ConstraintViolation(USERNAME_TAKEN.to_string()));
        }

        let new_user = NewUser {
            username: username.to_string(),
            password_hash,
        };
        match self.repository.create_user(new_user).await {
            Ok(user) => {
                debug!("Registered user {} with id {}", user.username, user.id);
                Ok(user)
            }
            // Lost a race against a concurrent registration of the same name.
            Err(e) if e.is_unique_violation() => {
                warn!("Concurrent registration for username {}", username);
                Err(Error::ConstraintViolation(USERNAME_TAKEN.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.repository.get_user(user_id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.get_user_by_username(username).await
    }
}

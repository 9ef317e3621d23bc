use async_trait::async_trait;
use folioadvisor_core::errors::{DatabaseError, Error};
use folioadvisor_core::users::{NewUser, User, UserRepositoryTrait};
use folioadvisor_core::utils::time_utils::now_utc;
use folioadvisor_core::Result;
use log::{debug, warn};

use crate::documents::{self, SharedKv};
use crate::keys;

pub struct KvUserRepository {
    kv: SharedKv,
}

impl KvUserRepository {
    pub fn new(kv: SharedKv) -> Self {
        Self { kv }
    }

    async fn persist(&self, user: &User) -> Result<()> {
        documents::write(&self.kv, &keys::user(user.id), user).await?;
        self.kv.sadd(keys::USERS_ALL, &user.id.to_string()).await
    }

    /// Undoes a half-finished registration so the username can be claimed again.
    async fn release(&self, user: &User) {
        let id = user.id.to_string();
        let cleanup = async {
            self.kv.srem(keys::USERS_ALL, &id).await?;
            self.kv.del(&keys::user(user.id)).await?;
            self.kv.del(&keys::username(&user.username)).await
        };
        if let Err(err) = cleanup.await {
            warn!(
                "Failed to release username '{}' after aborted registration: {}",
                user.username, err
            );
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for KvUserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let id = self.kv.incr(keys::USER_COUNTER).await?;

        // Claiming the username index is the single atomic step that decides
        // who owns the name. A losing attempt burns its id.
        let claimed = self
            .kv
            .set_nx(&keys::username(&new_user.username), &id.to_string())
            .await?;
        if !claimed {
            debug!("Username '{}' already claimed", new_user.username);
            return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                "username '{}'",
                new_user.username
            ))));
        }

        let now = now_utc();
        let user = User {
            id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        if let Err(err) = self.persist(&user).await {
            self.release(&user).await;
            return Err(err);
        }
        Ok(user)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        documents::read(&self.kv, &keys::user(user_id)).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        match documents::read_id(&self.kv, &keys::username(username)).await? {
            Some(id) => self.get_user(id).await,
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        documents::read_all(&self.kv, keys::USERS_ALL, keys::user).await
    }
}

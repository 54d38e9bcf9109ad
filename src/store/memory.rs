use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NewUser, StoreError, User, UserStore};

/// In-memory credential store. Used by tests and local runs without a
/// database; the write lock gives the same at-most-one-record-per-email
/// guarantee the Postgres unique constraint does.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email.clone(),
            first_name: new.first_name,
            last_name: new.last_name,
            password_hash: new.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(new.email, user.clone());
        Ok(user)
    }
}

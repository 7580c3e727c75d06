//! User Store
//!
//! Credential store boundary. Real persistence is an external collaborator;
//! the trait is the contract and `InMemoryUserStore` stands in for it in the
//! server and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::shared::error::{MarketError, Result};
use crate::user::entity::{NewUser, User};

/// Credential store operations the auth core depends on.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup; no case normalization is applied.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Persist a new account, assigning id and creation timestamp.
    ///
    /// Implementations must enforce email uniqueness atomically with the
    /// insert; a duplicate yields `MarketError::EmailTaken`. The
    /// check-then-insert sequence in callers is advisory only.
    async fn save(&self, new_user: NewUser) -> Result<User>;

    async fn find_all(&self) -> Result<Vec<User>>;

    async fn count(&self) -> Result<u64>;
}

/// In-memory user store.
///
/// Uniqueness check and insert happen under a single write lock, so two
/// concurrent registrations with the same email cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let users = self.users.read();
        Ok(users.values().any(|u| u.email == email))
    }

    async fn save(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write();

        if users.values().any(|u| u.email == new_user.email) {
            return Err(MarketError::email_taken(new_user.email));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let mut all: Vec<User> = self.users.read().values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.read().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::entity::Role;

    #[tokio::test]
    async fn test_save_assigns_id_and_timestamp() {
        let store = InMemoryUserStore::new();
        let user = store
            .save(NewUser::registered("a@x.com", "A", "hash"))
            .await
            .unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(user.role, Role::User);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store
            .save(NewUser::registered("a@x.com", "A", "hash1"))
            .await
            .unwrap();

        let err = store
            .save(NewUser::registered("a@x.com", "B", "hash2"))
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::EmailTaken { .. }));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store
            .save(NewUser::registered("Alice@x.com", "A", "hash"))
            .await
            .unwrap();

        assert!(store.find_by_email("Alice@x.com").await.unwrap().is_some());
        assert!(store.find_by_email("alice@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = InMemoryUserStore::new();
        let saved = store
            .save(NewUser::registered("a@x.com", "A", "hash"))
            .await
            .unwrap();

        let found = store.find_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
        assert!(store.find_by_id("missing").await.unwrap().is_none());
    }
}

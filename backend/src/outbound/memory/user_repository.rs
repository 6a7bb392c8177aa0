//! `UserRepository` held in a mutex-guarded map keyed by name.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

/// Credential store that lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.name().to_owned(), user))
            .collect();
        Self {
            users: Mutex::new(users),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(name).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.lock()?.insert(user.name().to_owned(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordHash;
    use chrono::Utc;
    use rstest::rstest;

    fn user(name: &str, hash: &str) -> User {
        User::new(name, PasswordHash::from_stored(hash), Utc::now(), Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_is_by_exact_name() {
        let repo = InMemoryUserRepository::with_users([user("subhan", "h1")]);

        assert!(repo.find_by_name("subhan").await.expect("find").is_some());
        assert!(repo.find_by_name("Subhan").await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_same_name() {
        let repo = InMemoryUserRepository::new();
        repo.upsert(&user("subhan", "old")).await.expect("upsert");
        repo.upsert(&user("subhan", "new")).await.expect("upsert");

        let stored = repo
            .find_by_name("subhan")
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.password_hash().as_str(), "new");
    }
}

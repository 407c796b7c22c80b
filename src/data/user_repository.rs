use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(user_id = %user.id, email = %user.email))]
    async fn save_user(&self, user: User) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(user.id.clone(), user.clone());
        debug!(
            user_id = %user.id,
            email = %user.email,
            "User saved to memory storage"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.values().find(|u| u.email == email).cloned();
        if user.is_none() {
            trace!(email = email, "User not found in storage");
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.get(id).cloned();
        if user.is_none() {
            trace!(user_id = id, "User not found in storage");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::taxonomy::EcoCategory;
    use chrono::Utc;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            preferred_categories: vec![],
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_user_saves_user_correctly() {
        let repo = InMemoryUserRepository::new();
        let mut stored = user("user-1", "test@example.com");
        stored.preferred_categories = vec![EcoCategory::Organic, EcoCategory::ZeroWaste];

        repo.save_user(stored.clone()).await.unwrap();

        let retrieved = repo.find_user_by_id("user-1").await.unwrap();
        assert!(retrieved.is_some());
        let retrieved_user = retrieved.unwrap();
        assert_eq!(retrieved_user.id, stored.id);
        assert_eq!(retrieved_user.email, stored.email);
        assert_eq!(
            retrieved_user.preferred_categories,
            vec![EcoCategory::Organic, EcoCategory::ZeroWaste]
        );
    }

    #[tokio::test]
    async fn test_find_user_by_email_finds_user_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.save_user(user("user-2", "alice@example.com"))
            .await
            .unwrap();

        let found = repo.find_user_by_email("alice@example.com").await.unwrap();

        assert!(found.is_some());
        assert_eq!(found.unwrap().id, "user-2");
    }

    #[tokio::test]
    async fn test_find_user_by_email_returns_none_for_nonexistent_email() {
        let repo = InMemoryUserRepository::new();

        let found = repo
            .find_user_by_email("nonexistent@example.com")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_user_by_id_returns_none_for_nonexistent_id() {
        let repo = InMemoryUserRepository::new();

        let found = repo.find_user_by_id("nonexistent-id").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_save_user_overwrites_existing_user() {
        let repo = InMemoryUserRepository::new();
        repo.save_user(user("user-4", "first@example.com"))
            .await
            .unwrap();
        repo.save_user(user("user-4", "second@example.com"))
            .await
            .unwrap();

        let retrieved = repo.find_user_by_id("user-4").await.unwrap().unwrap();
        assert_eq!(retrieved.email, "second@example.com");
    }

    #[tokio::test]
    async fn test_find_user_by_email_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.save_user(user("user-5", "Test@Example.com"))
            .await
            .unwrap();

        let found = repo.find_user_by_email("Test@Example.com").await.unwrap();
        assert!(found.is_some());

        let not_found = repo.find_user_by_email("test@example.com").await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_reads() {
        let repo = InMemoryUserRepository::new();
        repo.save_user(user("user-6", "concurrent@example.com"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let repo_clone = repo.clone();
                tokio::spawn(async move { repo_clone.find_user_by_id("user-6").await })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap().unwrap();
            assert!(result.is_some());
        }
    }

    #[tokio::test]
    async fn test_concurrent_writes() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo_clone = repo.clone();
                let new_user = user(&format!("user-{i}"), &format!("user{i}@example.com"));
                tokio::spawn(async move { repo_clone.save_user(new_user).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        for i in 0..10 {
            let found = repo.find_user_by_id(&format!("user-{i}")).await.unwrap();
            assert!(found.is_some());
        }
    }
}

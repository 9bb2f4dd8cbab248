use crate::domain::error::DomainError;
use crate::domain::model::{User, UserId};
use crate::domain::repository::{Result, UserRepository};
use std::sync::Arc;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, name: String, avatar: Option<String>) -> Result<User> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Invalid("user name must not be blank".to_string()));
        }

        let user = User::new(name, avatar);
        self.repo.save(&user).await?;
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    pub async fn get(&self, id: UserId) -> Result<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{init_in_memory, SqliteUserRepository};

    fn service() -> UserService {
        UserService::new(Arc::new(SqliteUserRepository::new(init_in_memory().unwrap())))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let user = service
            .create("  Ada ".to_string(), Some("https://cdn.example.com/ada.png".to_string()))
            .await
            .unwrap();

        let loaded = service.get(user.id).await.unwrap();
        assert_eq!(loaded.name, "Ada");
        assert_eq!(loaded.avatar, user.avatar);
    }

    #[tokio::test]
    async fn test_blank_name_and_unknown_id() {
        let service = service();
        assert!(matches!(
            service.create("   ".to_string(), None).await,
            Err(DomainError::Invalid(_))
        ));
        assert!(matches!(
            service.get(UserId::new()).await,
            Err(DomainError::NotFound(_))
        ));
    }
}

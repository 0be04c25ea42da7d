use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthError;
use crate::models::user::User;

/// In-memory, append-only user list shared across requests.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `user` unless the email is already registered.
    /// The duplicate check and the push happen under one write lock.
    pub async fn insert(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::UserExists);
        }
        users.push(user);
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.read().await.iter().find(|u| u.email == email).cloned()
    }

    pub async fn exists(&self, email: &str) -> bool {
        self.users.read().await.iter().any(|u| u.email == email)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

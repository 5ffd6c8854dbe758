//! User repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    error::RepositoryError,
    models::{NewUser, User, UserId},
};

/// Storage boundary for registered users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user. Fails with `DuplicateEmail` when the email is
    /// already registered (case-sensitive exact match).
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Get all users in registration order
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError>;
}

#[derive(Debug)]
struct UserTable {
    users: Vec<User>,
    next_id: UserId,
}

/// In-memory user repository; contents are lost on restart
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Create an empty user repository
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(UserTable {
                users: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write().await;

        if table.users.iter().any(|user| user.email == new_user.email) {
            return Err(RepositoryError::DuplicateEmail(new_user.email));
        }

        let user = User {
            id: table.next_id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        table.next_id += 1;
        table.users.push(user.clone());

        info!("Created user {} ({} total)", user.id, table.users.len());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.users.iter().find(|user| user.email == email).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.users.clone())
    }
}

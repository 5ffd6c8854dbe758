//! User model and related functionality

use chrono::{DateTime, Utc};
use common::lenient;
use serde::{Deserialize, Serialize};

/// User identifier, assigned from a counter starting at 1
pub type UserId = i64;

/// User entity as held by the registry
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New user record, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// User as exposed over the API: never carries password data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub password: Option<String>,
}

/// User login credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub password: Option<String>,
}

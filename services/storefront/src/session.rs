//! Signed-in user, persisted under the `user` key

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{error::StorageResult, storage::LocalStorage};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::persistence::Persisted;

/// Storage key for the signed-in user
pub const SESSION_KEY: &str = "user";

/// User record as returned by the gateway's auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub struct SessionStore {
    user: Option<SessionUser>,
    persisted: Persisted<SessionUser>,
}

impl SessionStore {
    pub fn open(storage: Arc<dyn LocalStorage>) -> StorageResult<Self> {
        let persisted = Persisted::new(storage, SESSION_KEY);
        let user = persisted.load()?;
        Ok(Self { user, persisted })
    }

    pub fn current(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, user: SessionUser) -> StorageResult<()> {
        self.persisted.save(&user)?;
        info!("Signed in as {}", user.email);
        self.user = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self) -> StorageResult<()> {
        self.persisted.remove()?;
        self.user = None;
        Ok(())
    }
}

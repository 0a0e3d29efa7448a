use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

impl UserInfo {
    pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.into(),
            email: None,
            signed_in_at: Utc::now(),
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self {
            uid: config.uid.clone(),
            display_name: config.display_name.clone(),
            email: config.email.clone(),
            signed_in_at: Utc::now(),
        }
    }
}

/// The identity collaborator's view of who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum AuthState {
    /// The provider has not reported yet.
    Unresolved,
    Resolved(Option<UserInfo>),
}

impl AuthState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, AuthState::Resolved(_))
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            AuthState::Resolved(Some(user)) => Some(user),
            _ => None,
        }
    }
}

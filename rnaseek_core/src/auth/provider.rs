use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use tracing::debug;

use crate::auth::models::UserInfo;
use crate::config::IdentityConfig;
use crate::error::Result;

/// The external sign-in service boundary.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Looks up a session that survived from earlier, if any.
    async fn restore_session(&self) -> Result<Option<UserInfo>>;

    async fn sign_in(&self) -> Result<UserInfo>;

    async fn sign_out(&self) -> Result<()>;
}

/// Single-user provider backed by static configuration, for running the front end locally.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    config: IdentityConfig,
    session: Mutex<Option<UserInfo>>,
}

impl LocalIdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        let session = config
            .restore_on_start
            .then(|| UserInfo::from_config(&config));

        Self {
            config,
            session: Mutex::new(session),
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn restore_session(&self) -> Result<Option<UserInfo>> {
        tokio::time::sleep(Duration::from_millis(self.config.session_restore_delay_ms)).await;
        Ok(self.session.lock().clone())
    }

    async fn sign_in(&self) -> Result<UserInfo> {
        let user = UserInfo::from_config(&self.config);
        debug!(uid = %user.uid, "local sign-in");
        *self.session.lock() = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.session.lock() = None;
        Ok(())
    }
}

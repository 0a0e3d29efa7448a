use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::models::{AuthState, UserInfo};
use crate::auth::provider::IdentityProvider;
use crate::auth::signal::{AuthSignal, AuthSubscription};
use crate::error::Result;

/// Runs identity actions against the provider and publishes what they produce.
#[derive(Clone)]
pub struct IdentityClient {
    provider: Arc<dyn IdentityProvider>,
    signal: AuthSignal,
}

impl IdentityClient {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_signal(provider, AuthSignal::new())
    }

    pub fn with_signal(provider: Arc<dyn IdentityProvider>, signal: AuthSignal) -> Self {
        Self { provider, signal }
    }

    pub fn signal(&self) -> &AuthSignal {
        &self.signal
    }

    pub fn subscribe(&self) -> AuthSubscription {
        self.signal.subscribe()
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.signal.current().user().cloned()
    }

    /// Resolves the initial state. A failing provider resolves to "nobody signed in".
    pub async fn restore_session(&self) -> Result<Option<UserInfo>> {
        match self.provider.restore_session().await {
            Ok(user) => {
                match &user {
                    Some(user) => info!(uid = %user.uid, "restored session"),
                    None => info!("no session to restore"),
                }
                self.signal.publish(AuthState::Resolved(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!("Failed to restore session: {}", err);
                self.signal.publish(AuthState::Resolved(None));
                Err(err)
            }
        }
    }

    pub async fn sign_in(&self) -> Result<UserInfo> {
        let user = self.provider.sign_in().await?;
        info!(uid = %user.uid, display_name = %user.display_name, "signed in");
        self.signal.publish(AuthState::Resolved(Some(user.clone())));
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.provider.sign_out().await?;
        info!("signed out");
        self.signal.publish(AuthState::Resolved(None));
        Ok(())
    }
}

use std::sync::Arc;
use tokio::sync::watch;

use crate::auth::models::{AuthState, UserInfo};

/// Process-wide "current user" value. Cloning shares the same underlying channel.
#[derive(Debug, Clone)]
pub struct AuthSignal {
    sender: Arc<watch::Sender<AuthState>>,
}

impl Default for AuthSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AuthState::Unresolved);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn publish(&self, state: AuthState) {
        self.sender.send_replace(state);
    }

    pub fn current(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A live handle on [`AuthSignal`]. Dropping it (or calling `unsubscribe`) detaches it.
#[derive(Debug, Clone)]
pub struct AuthSubscription {
    receiver: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    pub fn current(&self) -> AuthState {
        self.receiver.borrow().clone()
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.receiver.borrow().user().cloned()
    }

    /// Waits for the next published value. `None` once the signal itself is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Waits until the provider has reported a result.
    pub async fn resolved(&mut self) -> Option<AuthState> {
        let state = self
            .receiver
            .wait_for(|state| state.is_resolved())
            .await
            .ok()?;
        Some((*state).clone())
    }

    pub fn unsubscribe(self) {}
}

use serde::Serialize;

use crate::auth::{AuthState, AuthSubscription, UserInfo};
use crate::error::{AppError, Result};

pub const LOGIN_REQUIRED_NOTICE: &str = "You must be logged in to access this tool.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateView {
    Loading,
    UploadForm,
    LoginRequired,
}

impl GateView {
    pub fn for_state(state: &AuthState) -> Self {
        match state {
            AuthState::Unresolved => GateView::Loading,
            AuthState::Resolved(Some(_)) => GateView::UploadForm,
            AuthState::Resolved(None) => GateView::LoginRequired,
        }
    }
}

/// Shows the upload form only to a signed-in user.
#[derive(Debug, Clone)]
pub struct AuthGate {
    subscription: AuthSubscription,
}

impl AuthGate {
    pub fn new(subscription: AuthSubscription) -> Self {
        Self { subscription }
    }

    pub fn view(&self) -> GateView {
        GateView::for_state(&self.subscription.current())
    }

    pub fn require_user(&self) -> Result<UserInfo> {
        self.subscription.current_user().ok_or(AppError::Unauthorized)
    }
}

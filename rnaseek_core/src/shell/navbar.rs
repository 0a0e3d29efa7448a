use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

use crate::auth::{AuthState, IdentityClient};
use crate::shell::pages::Page;

pub const SIGN_IN_FAILED: &str = "Failed to sign in. Please try again.";
pub const SIGN_OUT_FAILED: &str = "Failed to sign out. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountView {
    Loading,
    SignedOut,
    SignedIn { display_name: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    pub links: Vec<Page>,
    pub account: AccountView,
    pub error: Option<String>,
}

pub struct NavBar {
    identity: IdentityClient,
    error: Mutex<Option<String>>,
}

impl NavBar {
    pub fn new(identity: IdentityClient) -> Self {
        Self {
            identity,
            error: Mutex::new(None),
        }
    }

    pub fn view(&self) -> NavView {
        let state = self.identity.signal().current();
        Self::view_for(&state, self.error.lock().clone())
    }

    pub fn view_for(state: &AuthState, error: Option<String>) -> NavView {
        let mut links = vec![Page::Home, Page::About, Page::Contact];
        if state.user().is_some() {
            links.push(Page::Tools);
        }

        let account = match state {
            AuthState::Unresolved => AccountView::Loading,
            AuthState::Resolved(None) => AccountView::SignedOut,
            AuthState::Resolved(Some(user)) => AccountView::SignedIn {
                display_name: user.display_name.clone(),
            },
        };

        NavView {
            links,
            account,
            error,
        }
    }

    pub async fn sign_in(&self) -> bool {
        let result = self.identity.sign_in().await;
        self.record(result.map(|_| ()), SIGN_IN_FAILED)
    }

    pub async fn sign_out(&self) -> bool {
        let result = self.identity.sign_out().await;
        self.record(result, SIGN_OUT_FAILED)
    }

    fn record(&self, result: crate::error::Result<()>, notice: &str) -> bool {
        let mut error = self.error.lock();
        match result {
            Ok(()) => {
                *error = None;
                true
            }
            Err(err) => {
                warn!("{}: {}", notice, err);
                *error = Some(notice.to_string());
                false
            }
        }
    }
}

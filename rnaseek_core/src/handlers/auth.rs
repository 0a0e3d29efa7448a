use axum::{extract::State, response::Redirect};

use crate::AppState;

/// Sign-in failures surface as the navbar notice, so both actions always redirect home.
pub async fn login(State(state): State<AppState>) -> Redirect {
    state.navbar.sign_in().await;
    Redirect::to("/")
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.navbar.sign_out().await;
    Redirect::to("/")
}

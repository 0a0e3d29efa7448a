use axum::{extract::State, response::IntoResponse, Json};

use crate::{models::ApiResponse, AppState};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let auth = state.identity.signal().current();

    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "app": state.app_name,
        "version": state.version,
        "timestamp": chrono::Utc::now().timestamp(),
        "auth_resolved": auth.is_resolved(),
        "controller": state.controller.id(),
        "submitting": state.controller.is_submitting(),
    })))
}

//! Route table for the site

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{auth, health, pages, tools},
    middleware::auth::require_user_middleware,
    AppState,
};

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let tool_actions = Router::new()
        .route("/tools/select", post(tools::select_file))
        .route("/tools/submit", post(tools::submit_file))
        .route("/tools/clear", post(tools::clear_file))
        .route("/api/tools/state", get(tools::form_state))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_user_middleware,
        ));

    Router::new()
        .route("/", get(pages::handle_home))
        .route("/about", get(pages::handle_about))
        .route("/contact", get(pages::handle_contact))
        .route("/tools", get(pages::handle_tools))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/health", get(health::handle_health))
        .merge(tool_actions)
}

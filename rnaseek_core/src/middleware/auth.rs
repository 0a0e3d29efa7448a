use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::AppError;
use crate::AppState;

/// Rejects the request unless the identity signal reports a signed-in user, and hands that
/// user to the handler as an `Extension<UserInfo>`.
pub async fn require_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state.gate.require_user().map_err(|err| {
        debug!(path = %request.uri().path(), "request without a signed-in user");
        err
    })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

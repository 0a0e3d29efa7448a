use axum::{
    extract::{Extension, Multipart, State},
    response::{IntoResponse, Redirect},
    Json,
};
use tracing::{debug, info};

use crate::{
    auth::UserInfo,
    error::{AppError, Result},
    files::SelectedFile,
    models::ApiResponse,
    upload::SubmitAttempt,
    AppState,
};

const PICKER_FIELD: &str = "file";
const TOOLS_PATH: &str = "/tools";

pub async fn select_file(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let mut selected: Option<SelectedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(PICKER_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if filename.is_empty() {
            debug!("file picker submitted without a selection");
            break;
        }

        let content_type = field.content_type().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        debug!(uid = %user.uid, filename = %filename, size = data.len(), "file received from picker");
        selected = Some(SelectedFile::new(filename, content_type, data.to_vec()));
        break;
    }

    let Some(file) = selected else {
        return Ok(Redirect::to(TOOLS_PATH));
    };

    match state.controller.on_file_chosen(file) {
        Ok(()) | Err(AppError::Validation(_)) => Ok(Redirect::to(TOOLS_PATH)),
        Err(err) => Err(err),
    }
}

pub async fn submit_file(
    State(state): State<AppState>,
    Extension(user): Extension<UserInfo>,
) -> Result<Redirect> {
    match state.controller.on_submit().await {
        SubmitAttempt::InFlight => return Err(AppError::SubmissionInFlight),
        SubmitAttempt::Completed(outcome) => {
            info!(uid = %user.uid, ?outcome, "upload form submitted");
        }
        SubmitAttempt::NoFile | SubmitAttempt::Superseded => {}
    }

    Ok(Redirect::to(TOOLS_PATH))
}

pub async fn clear_file(State(state): State<AppState>) -> Redirect {
    state.controller.on_clear();
    Redirect::to(TOOLS_PATH)
}

pub async fn form_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.controller.snapshot()))
}

//! State machine behind the FASTQ upload form.
//!
//! `Empty -> FileSelected -> Submitting -> Submitted(..)`, with `on_clear` returning to `Empty`
//! from anywhere. While a submission is in flight the form refuses new selections and further
//! submits; clearing is always allowed and makes the in-flight result stale.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use crate::files::{
    FileValidator, GzipPreparer, PassthroughPreparer, PayloadPreparer, SelectedFile,
    SelectedFileSummary,
};
use crate::upload::picker::{FilePicker, PickerState};
use crate::upload::submitter::{MultipartPayload, SubmissionReceipt, Submitter};

pub const DEFAULT_FIELD_NAME: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "message", rename_all = "snake_case")]
pub enum UploadOutcome {
    Success,
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "outcome", rename_all = "snake_case")]
pub enum FormState {
    Empty,
    FileSelected,
    Submitting,
    Submitted(UploadOutcome),
}

/// What a call to [`UploadController::on_submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    NoFile,
    InFlight,
    Completed(UploadOutcome),
    /// The form was cleared while the request was out; its result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub state: FormState,
    pub selected_file: Option<SelectedFileSummary>,
    pub error: Option<String>,
    pub picker_value: Option<String>,
    pub can_submit: bool,
    pub can_clear: bool,
    pub last_receipt: Option<SubmissionReceipt>,
}

#[derive(Debug)]
struct FormInner {
    state: FormState,
    file: Option<Arc<SelectedFile>>,
    error: Option<String>,
    generation: u64,
    last_receipt: Option<SubmissionReceipt>,
}

impl Default for FormInner {
    fn default() -> Self {
        Self {
            state: FormState::Empty,
            file: None,
            error: None,
            generation: 0,
            last_receipt: None,
        }
    }
}

pub struct UploadController {
    id: Uuid,
    validator: FileValidator,
    preparer: Arc<dyn PayloadPreparer>,
    submitter: Arc<dyn Submitter>,
    picker: Arc<dyn FilePicker>,
    field_name: String,
    inner: Mutex<FormInner>,
}

impl std::fmt::Debug for UploadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadController")
            .field("id", &self.id)
            .field("field_name", &self.field_name)
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

impl UploadController {
    pub fn new(submitter: Arc<dyn Submitter>) -> Self {
        Self {
            id: Uuid::new_v4(),
            validator: FileValidator::with_default_config(),
            preparer: Arc::new(GzipPreparer),
            submitter,
            picker: Arc::new(PickerState::new()),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            inner: Mutex::new(FormInner::default()),
        }
    }

    pub fn from_config(config: &UploadConfig, submitter: Arc<dyn Submitter>) -> Self {
        let preparer: Arc<dyn PayloadPreparer> = if config.decompress_gzip {
            Arc::new(GzipPreparer)
        } else {
            Arc::new(PassthroughPreparer)
        };

        Self::new(submitter)
            .with_preparer(preparer)
            .with_field_name(config.field_name.clone())
    }

    pub fn with_preparer(mut self, preparer: Arc<dyn PayloadPreparer>) -> Self {
        self.preparer = preparer;
        self
    }

    pub fn with_picker(mut self, picker: Arc<dyn FilePicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validates a new selection. Rejection drops whatever file was held before.
    pub fn on_file_chosen(&self, file: SelectedFile) -> Result<()> {
        let mut inner = self.inner.lock();

        if inner.state == FormState::Submitting {
            debug!(controller = %self.id, filename = %file.name, "selection ignored during submission");
            return Err(AppError::SubmissionInFlight);
        }

        self.picker.show(&file.name);

        match self.validator.validate(file).into_result() {
            Ok(file) => {
                info!(controller = %self.id, filename = %file.name, size = file.size(), "file selected");
                inner.file = Some(Arc::new(file));
                inner.error = None;
                inner.state = FormState::FileSelected;
                Ok(())
            }
            Err(err) => {
                inner.file = None;
                inner.error = Some(err.to_string());
                inner.state = FormState::Empty;
                Err(err)
            }
        }
    }

    pub fn on_clear(&self) {
        let mut inner = self.inner.lock();
        let generation = inner.generation + 1;
        *inner = FormInner {
            generation,
            ..FormInner::default()
        };
        self.picker.reset();
        debug!(controller = %self.id, "form cleared");
    }

    /// Prepares the held file and hands it to the submitter. At most one request per call.
    pub async fn on_submit(&self) -> SubmitAttempt {
        let (file, generation) = {
            let mut inner = self.inner.lock();
            if inner.state == FormState::Submitting {
                return SubmitAttempt::InFlight;
            }
            let Some(file) = inner.file.clone() else {
                return SubmitAttempt::NoFile;
            };
            inner.state = FormState::Submitting;
            (file, inner.generation)
        };

        let mut guard = InFlightGuard {
            controller: self,
            generation,
            armed: true,
        };

        let result = self.submit_file(&file).await;
        guard.armed = false;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(controller = %self.id, filename = %file.name, "discarding result of cleared submission");
            return SubmitAttempt::Superseded;
        }

        let outcome = match result {
            Ok(receipt) => {
                info!(controller = %self.id, filename = %file.name, status = receipt.status, "submission accepted");
                inner.error = None;
                inner.last_receipt = Some(receipt);
                UploadOutcome::Success
            }
            Err(err) => {
                let message = err.to_string();
                warn!(controller = %self.id, filename = %file.name, error = %message, "submission failed");
                inner.error = Some(message.clone());
                UploadOutcome::Failure(message)
            }
        };

        inner.state = FormState::Submitted(outcome.clone());
        SubmitAttempt::Completed(outcome)
    }

    async fn submit_file(&self, file: &SelectedFile) -> Result<SubmissionReceipt> {
        let processed = self.preparer.prepare(file)?;
        let payload = MultipartPayload {
            field_name: self.field_name.clone(),
            file: processed,
        };
        self.submitter.submit(payload).await
    }

    pub fn state(&self) -> FormState {
        self.inner.lock().state.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }

    pub fn selected_file(&self) -> Option<Arc<SelectedFile>> {
        self.inner.lock().file.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.lock().state == FormState::Submitting
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let inner = self.inner.lock();
        let has_file = inner.file.is_some();
        let idle = inner.state != FormState::Submitting;

        FormSnapshot {
            state: inner.state.clone(),
            selected_file: inner.file.as_ref().map(|f| f.summary()),
            error: inner.error.clone(),
            picker_value: self.picker.value(),
            can_submit: has_file && idle,
            can_clear: has_file && idle,
            last_receipt: inner.last_receipt.clone(),
        }
    }
}

/// Puts the form back to `FileSelected` if a submit future is dropped before it resolves.
struct InFlightGuard<'a> {
    controller: &'a UploadController,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.controller.inner.lock();
        if inner.generation == self.generation && inner.state == FormState::Submitting {
            warn!(controller = %self.controller.id, "submission abandoned before completion");
            inner.state = FormState::FileSelected;
        }
    }
}

pub mod controller;
pub mod picker;
pub mod submitter;

pub use controller::{FormSnapshot, FormState, SubmitAttempt, UploadController, UploadOutcome};
pub use picker::{FilePicker, PickerState};
pub use submitter::{HttpSubmitter, MultipartPayload, SubmissionReceipt, Submitter};

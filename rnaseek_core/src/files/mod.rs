pub mod decompress;
pub mod models;
pub mod validation;

pub use decompress::{maybe_decompress, GzipPreparer, PassthroughPreparer, PayloadPreparer};
pub use models::{ProcessedFile, SelectedFile, SelectedFileSummary};
pub use validation::{FileValidationConfig, FileValidator, ValidationResult, INVALID_FILE_TYPE_MESSAGE};

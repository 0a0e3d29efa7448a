use std::collections::HashSet;

use crate::error::AppError;
use crate::files::models::SelectedFile;

pub const INVALID_FILE_TYPE_MESSAGE: &str =
    "Invalid file type. Please upload a .fastq or .fastq.gz file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(SelectedFile),
    Rejected(String),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    pub fn into_result(self) -> Result<SelectedFile, AppError> {
        match self {
            ValidationResult::Accepted(file) => Ok(file),
            ValidationResult::Rejected(reason) => Err(AppError::Validation(reason)),
        }
    }
}

/// Accepted MIME types and filename suffixes for FASTQ uploads.
#[derive(Debug, Clone)]
pub struct FileValidationConfig {
    pub allowed_content_types: HashSet<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for FileValidationConfig {
    fn default() -> Self {
        let allowed_content_types = ["application/gzip", "application/x-gzip", mime::TEXT_PLAIN.as_ref()]
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            allowed_content_types,
            allowed_extensions: vec![".fastq".to_string(), ".fastq.gz".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileValidator {
    config: FileValidationConfig,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl FileValidator {
    pub fn new(config: FileValidationConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(FileValidationConfig::default())
    }

    /// Accepts on an allowed MIME type OR an allowed extension.
    ///
    /// The declared type comes from the browser and is not trusted on its own; for gzip
    /// uploads the extension is what actually decides.
    pub fn classify(&self, filename: &str, declared_mime_type: &str) -> Result<(), String> {
        if self.is_allowed_content_type(declared_mime_type) || self.has_allowed_extension(filename) {
            Ok(())
        } else {
            Err(INVALID_FILE_TYPE_MESSAGE.to_string())
        }
    }

    pub fn validate(&self, file: SelectedFile) -> ValidationResult {
        match self.classify(&file.name, &file.declared_mime_type) {
            Ok(()) => ValidationResult::Accepted(file),
            Err(reason) => {
                tracing::debug!(filename = %file.name, mime = %file.declared_mime_type, "rejected file selection");
                ValidationResult::Rejected(reason)
            }
        }
    }

    fn is_allowed_content_type(&self, content_type: &str) -> bool {
        self.config.allowed_content_types.contains(content_type)
    }

    fn has_allowed_extension(&self, filename: &str) -> bool {
        let lowered = filename.to_lowercase();
        self.config
            .allowed_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext.as_str()))
    }
}

/// Name-and-type check under the default policy. [`FileValidator::validate`] is the entry
/// point that yields a [`ValidationResult`] for a whole selection.
pub fn classify(filename: &str, declared_mime_type: &str) -> Result<(), String> {
    FileValidator::with_default_config().classify(filename, declared_mime_type)
}

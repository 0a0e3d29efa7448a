use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// A file picked by the user. Replaced wholesale on the next selection, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub declared_mime_type: String,
    pub raw_bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, declared_mime_type: impl Into<String>, raw_bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_mime_type: declared_mime_type.into(),
            raw_bytes,
        }
    }

    /// Reads a file from disk, declaring the MIME type a browser would guess from its name.
    pub async fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw_bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let declared_mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            name,
            declared_mime_type,
            raw_bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.raw_bytes.len() as u64
    }

    pub fn summary(&self) -> SelectedFileSummary {
        SelectedFileSummary {
            name: self.name.clone(),
            declared_mime_type: self.declared_mime_type.clone(),
            size: self.size(),
        }
    }
}

/// What the form shows about the held file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFileSummary {
    pub name: String,
    pub declared_mime_type: String,
    pub size: u64,
}

/// The logical file handed to the submitter, after optional decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ProcessedFile {
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

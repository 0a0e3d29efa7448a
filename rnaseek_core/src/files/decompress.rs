//! Gzip handling for selected FASTQ files.
//!
//! A `.gz` selection is inflated in memory and handed on as a plain-text file with the suffix
//! removed. Anything else passes through untouched.

use flate2::read::MultiGzDecoder;
use std::io::Read;

use crate::error::{AppError, Result};
use crate::files::models::{ProcessedFile, SelectedFile};

const GZIP_SUFFIX: &str = ".gz";

pub fn is_gzip_name(filename: &str) -> bool {
    let bytes = filename.as_bytes();
    bytes.len() >= GZIP_SUFFIX.len()
        && bytes[bytes.len() - GZIP_SUFFIX.len()..].eq_ignore_ascii_case(GZIP_SUFFIX.as_bytes())
}

/// Drops a trailing `.gz` in any letter case.
pub fn strip_gzip_suffix(filename: &str) -> &str {
    if is_gzip_name(filename) {
        &filename[..filename.len() - GZIP_SUFFIX.len()]
    } else {
        filename
    }
}

/// Inflates every gzip member in `data`, so BGZF output comes through whole.
pub fn gunzip_text(data: &[u8]) -> Result<String> {
    let mut decoder = MultiGzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| AppError::Decompression(e.to_string()))?;

    String::from_utf8(decompressed).map_err(|e| AppError::Decompression(e.to_string()))
}

pub fn maybe_decompress(file: &SelectedFile) -> Result<ProcessedFile> {
    if !is_gzip_name(&file.name) {
        return Ok(passthrough(file));
    }

    let text = gunzip_text(&file.raw_bytes)?;
    let name = strip_gzip_suffix(&file.name).to_string();

    tracing::debug!(
        original = %file.name,
        decompressed = %name,
        compressed_size = file.raw_bytes.len(),
        decompressed_size = text.len(),
        "decompressed gzip selection"
    );

    Ok(ProcessedFile {
        name,
        content_type: mime::TEXT_PLAIN.to_string(),
        bytes: text.into_bytes(),
    })
}

fn passthrough(file: &SelectedFile) -> ProcessedFile {
    let content_type = if file.declared_mime_type.is_empty() {
        mime_guess::from_path(&file.name)
            .first_or_octet_stream()
            .to_string()
    } else {
        file.declared_mime_type.clone()
    };

    ProcessedFile {
        name: file.name.clone(),
        content_type,
        bytes: file.raw_bytes.clone(),
    }
}

/// Turns a selection into the file that gets submitted.
pub trait PayloadPreparer: Send + Sync {
    fn prepare(&self, file: &SelectedFile) -> Result<ProcessedFile>;
}

/// Inflates `.gz` selections before submission.
#[derive(Debug, Default, Clone, Copy)]
pub struct GzipPreparer;

impl PayloadPreparer for GzipPreparer {
    fn prepare(&self, file: &SelectedFile) -> Result<ProcessedFile> {
        maybe_decompress(file)
    }
}

/// Submits the selection exactly as chosen.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughPreparer;

impl PayloadPreparer for PassthroughPreparer {
    fn prepare(&self, file: &SelectedFile) -> Result<ProcessedFile> {
        Ok(passthrough(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_suffix_detection() {
        assert!(is_gzip_name("reads.fastq.gz"));
        assert!(is_gzip_name("READS.FASTQ.GZ"));
        assert!(!is_gzip_name("reads.fastq"));
        assert!(!is_gzip_name("reads.gzip"));
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_gzip_suffix("reads.fastq.gz"), "reads.fastq");
        assert_eq!(strip_gzip_suffix("READS.FASTQ.GZ"), "READS.FASTQ");
        assert_eq!(strip_gzip_suffix("reads.gz.fastq"), "reads.gz.fastq");
    }

    #[test]
    fn test_decompress_valid_stream() {
        let file = SelectedFile::new("sample.fastq.gz", "application/gzip", gzip(b"ACGT\n"));
        let processed = maybe_decompress(&file).unwrap();

        assert_eq!(processed.name, "sample.fastq");
        assert_eq!(processed.content_type, "text/plain");
        assert_eq!(processed.as_text(), Some("ACGT\n"));
    }

    #[test]
    fn test_decompress_concatenated_members() {
        let mut data = gzip(b"@read1\nACGT\n+\n!!!!\n");
        data.extend(gzip(b"@read2\nTTTT\n+\n!!!!\n"));
        let file = SelectedFile::new("bgzf.fastq.gz", "application/gzip", data);
        let processed = maybe_decompress(&file).unwrap();

        assert_eq!(processed.name, "bgzf.fastq");
        assert_eq!(
            processed.as_text(),
            Some("@read1\nACGT\n+\n!!!!\n@read2\nTTTT\n+\n!!!!\n")
        );
    }

    #[test]
    fn test_decompress_corrupt_stream() {
        let file = SelectedFile::new("sample.fastq.gz", "application/gzip", b"ACGT\n".to_vec());
        let err = maybe_decompress(&file).unwrap_err();

        assert!(matches!(err, AppError::Decompression(_)));
        assert!(err.to_string().starts_with("Error processing file: "));
    }

    #[test]
    fn test_decompress_truncated_stream() {
        let mut data = gzip(b"@read1\nACGT\n+\n!!!!\n");
        data.truncate(data.len() / 2);
        let file = SelectedFile::new("sample.fastq.gz", "", data);

        assert!(matches!(maybe_decompress(&file), Err(AppError::Decompression(_))));
    }

    #[test]
    fn test_decompress_non_utf8_payload() {
        let file = SelectedFile::new("blob.gz", "", gzip(&[0xff, 0xfe, 0x00, 0x81]));
        assert!(matches!(maybe_decompress(&file), Err(AppError::Decompression(_))));
    }

    #[test]
    fn test_passthrough_keeps_declared_type() {
        let file = SelectedFile::new("reads.fastq", "application/octet-stream", b"@r\n".to_vec());
        let processed = maybe_decompress(&file).unwrap();

        assert_eq!(processed.name, "reads.fastq");
        assert_eq!(processed.content_type, "application/octet-stream");
        assert_eq!(processed.bytes, b"@r\n");
    }

    #[test]
    fn test_passthrough_guesses_missing_type() {
        let file = SelectedFile::new("notes.txt", "", b"hi".to_vec());
        assert_eq!(maybe_decompress(&file).unwrap().content_type, "text/plain");

        let file = SelectedFile::new("reads.fastq", "", b"@r\n".to_vec());
        assert!(!maybe_decompress(&file).unwrap().content_type.is_empty());
    }

    #[test]
    fn test_passthrough_preparer_leaves_gzip_alone() {
        let compressed = gzip(b"ACGT\n");
        let file = SelectedFile::new("sample.fastq.gz", "application/gzip", compressed.clone());
        let processed = PassthroughPreparer.prepare(&file).unwrap();

        assert_eq!(processed.name, "sample.fastq.gz");
        assert_eq!(processed.bytes, compressed);
    }
}

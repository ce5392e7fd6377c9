//! File intake: validation and decoding of a user-selected source file.
//!
//! Checks run in a fixed order and the first failure wins: size limit,
//! then supported extension. Only a file that passes both is read.

pub mod languages;
pub mod source;

use thiserror::Error;

use crate::constants::MAX_FILE_SIZE;
use crate::models::IngestedFile;

pub use languages::{SUPPORTED_LANGUAGES, extension_of, language_for};
pub use source::{DiskFile, FileHandle, MemoryFile};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors from intake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("File size exceeds 5MB limit.")]
    TooLarge { size: u64 },

    #[error("Unsupported file type. Supported types: {}", languages::supported_list())]
    Unsupported { extension: Option<String> },

    #[error("Error reading file: {0}")]
    Read(String),
}

impl IntakeError {
    /// Validation errors are detected before any I/O.
    pub fn is_validation(&self) -> bool {
        !matches!(self, IntakeError::Read(_))
    }
}

/// Check a name and size against the limits; returns the language label.
pub fn validate(name: &str, size: u64) -> Result<&'static str, IntakeError> {
    if size > MAX_FILE_SIZE {
        return Err(IntakeError::TooLarge { size });
    }
    let extension = extension_of(name);
    extension
        .as_deref()
        .and_then(language_for)
        .ok_or(IntakeError::Unsupported { extension })
}

/// Decode file bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_text(bytes: Vec<u8>) -> Result<String, IntakeError> {
    let bytes = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };
    String::from_utf8(bytes).map_err(|e| IntakeError::Read(format!("not valid UTF-8 text ({e})")))
}

/// Validate and read a file into an [`IngestedFile`].
pub async fn ingest(file: &dyn FileHandle) -> Result<IngestedFile, IntakeError> {
    let name = file.name();
    let size = file.size();
    let language = validate(name, size)?;

    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| IntakeError::Read(e.to_string()))?;
    let content = decode_text(bytes)?;

    tracing::debug!(file = name, size, language, "file ingested");

    Ok(IngestedFile {
        name: name.to_string(),
        size,
        language,
        content,
    })
}

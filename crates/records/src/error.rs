use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors that can occur while ingesting a record payload
///
/// Only payload-level problems surface here. A single malformed record is
/// skipped and reported through [`crate::IngestReport`] instead.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The payload is not valid JSON
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not an array of records
    #[error("Expected a JSON array of records, got {0}")]
    NotAnArray(String),
}

impl RecordError {
    /// Create a not-an-array error from the offending JSON kind
    pub fn not_an_array(kind: impl Into<String>) -> Self {
        Self::NotAnArray(kind.into())
    }
}

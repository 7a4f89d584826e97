//! Error types for the documentation crate.
//!
//! Building the document never fails. Only turning it into bytes can.

use thiserror::Error;

/// Errors that can occur while exporting documentation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the OpenAPI document to JSON.
    #[error("Failed to serialize OpenAPI document: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

//! Error types for interchange serialization.

use meridian_model::ModelError;
use thiserror::Error;

/// Errors raised on the serialization path.
///
/// The writer-protocol variants (`UnbalancedStructure`, `WriterClosed`)
/// are always caller bugs, never recoverable at this level; sink failures
/// propagate unchanged and are fatal to the current write. Nothing here
/// has retry semantics, and partial output already written to the sink is
/// not rolled back.
#[derive(Debug, Error)]
pub enum SerdeError {
    /// JSON error from the string-escaping path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the underlying character sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A closing event did not match the innermost open structure.
    #[error("unbalanced structure: {0}")]
    UnbalancedStructure(String),

    /// A structural event arrived after `finish`.
    #[error("write after finish")]
    WriterClosed,

    /// The element model rejected a property access during serialization.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for interchange serialization operations.
pub type Result<T> = std::result::Result<T, SerdeError>;

//! Errors raised while reading or parsing a deployment document.
//!
//! Schema violations are not errors; they are reported through
//! [`ValidationResult`](crate::ValidationResult).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur before a document reaches the validator.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The path does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Any other failure to read the file.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed YAML.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`DocumentError`].
pub type Result<T> = std::result::Result<T, DocumentError>;

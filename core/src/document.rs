//! Reading deployment documents into untyped values.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{DocumentError, Result};

/// Parses YAML text into an untyped document.
///
/// JSON is a subset of YAML, so JSON documents are accepted too.
///
/// # Errors
///
/// Returns [`Yaml`](DocumentError::Yaml) if the text is not well-formed or
/// uses constructs with no JSON equivalent.
///
/// # Examples
///
/// ```
/// use fde_deploy_core::parse_document;
///
/// let doc = parse_document("kind: Deployment\nspec:\n  scaling:\n    minReplicas: 2\n").unwrap();
/// assert_eq!(doc["kind"], "Deployment");
/// assert_eq!(doc["spec"]["scaling"]["minReplicas"], 2);
///
/// assert!(parse_document("kind: [unterminated").is_err());
/// ```
pub fn parse_document(content: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(content)?)
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns [`NotFound`](DocumentError::NotFound) when the path does not
/// exist, [`Io`](DocumentError::Io) for other read failures, and
/// [`Yaml`](DocumentError::Yaml) when parsing fails.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DocumentError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DocumentError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read deployment document");
    parse_document(&content)
}

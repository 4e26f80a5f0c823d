//! Validation entry point.
//!
//! Checks an untyped document against the deployment schema and, when it
//! conforms, attaches the advisory warnings from [`crate::rules`].
//!
//! # Examples
//!
//! ```
//! use fde_deploy_core::validate_config;
//! use serde_json::json;
//!
//! let result = validate_config(&json!({
//!     "apiVersion": "fde/v1",
//!     "kind": "Deployment",
//!     "metadata": { "name": "api", "namespace": "default", "environment": "development" },
//!     "spec": {}
//! }));
//! assert!(!result.valid);
//! assert_eq!(result.errors, vec![
//!     "spec.service: Required",
//!     "spec.scaling: Required",
//!     "spec.rollout: Required",
//! ]);
//! ```

use serde_json::Value;
use tracing::debug;

use crate::checker::Checker;
use crate::rules::evaluate_warnings;
use crate::schema;
use crate::types::ValidationResult;

/// Validates a parsed deployment document.
///
/// Schema violations are a normal outcome: they come back as
/// `valid == false` with one `<path>: <reason>` entry per violation, in
/// schema field order. Defaults (`spec.service.tag`) are applied to the
/// returned config.
pub fn validate_config(document: &Value) -> ValidationResult {
    let mut checker = Checker::new();
    let config = schema::deployment(&mut checker, document);
    let errors = checker.into_errors();

    match config {
        Some(config) if errors.is_empty() => {
            let warnings = evaluate_warnings(&config);
            debug!(
                name = %config.metadata.name,
                warnings = warnings.len(),
                "deployment config passed schema validation"
            );
            ValidationResult::passed(config, warnings)
        }
        _ => {
            debug!(errors = errors.len(), "deployment config failed schema validation");
            ValidationResult::failed(errors)
        }
    }
}

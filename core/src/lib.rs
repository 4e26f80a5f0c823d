//! Validation of FDE deployment configuration documents.
//!
//! A deployment document is a YAML mapping describing one service: its
//! container, resource limits, replica range, rollout strategy and optional
//! network and observability policy. This crate:
//!
//! - parses documents into untyped values ([`parse_document`],
//!   [`load_document`]);
//! - checks them against the fixed `fde/v1` schema, collecting every
//!   violation as `<dotted.path>: <reason>` ([`validate_config`]);
//! - derives advisory warnings for risky but valid configs
//!   ([`evaluate_warnings`]);
//! - suggests named deployment patterns ([`get_pattern_recommendations`]).
//!
//! # Example
//!
//! ```
//! use fde_deploy_core::*;
//!
//! let doc = parse_document(r#"
//! apiVersion: fde/v1
//! kind: Deployment
//! metadata:
//!   name: llm-service
//!   namespace: ml
//!   environment: production
//! spec:
//!   service:
//!     name: llm
//!     image: registry.local/llm
//!     port: 8080
//!     resources: { cpu: 2000m, memory: 8Gi }
//!   scaling: { minReplicas: 1, maxReplicas: 4 }
//!   rollout: { type: rolling }
//! "#).unwrap();
//!
//! let result = validate_config(&doc);
//! assert!(result.valid);
//!
//! let config = result.config().unwrap();
//! assert_eq!(config.spec.service.tag, "latest");
//! assert!(result.warnings.iter().any(|w| w.contains("minReplicas < 2")));
//! assert_eq!(get_pattern_recommendations(config).len(), 2);
//! ```

mod checker;
mod document;
mod error;
mod recommend;
mod rules;
mod schema;
mod types;
mod validate;

pub use checker::ROOT_PATH;
pub use document::{load_document, parse_document};
pub use error::{DocumentError, Result};
pub use recommend::{HYBRID_BRIDGE, OBSERVABILITY_FIRST, SECURE_EDGE, get_pattern_recommendations};
pub use rules::{HIGH_REPLICA_THRESHOLD, PRODUCTION_MIN_REPLICAS, evaluate_warnings};
pub use types::*;
pub use validate::validate_config;

/// Library version, reported by the CLI's `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

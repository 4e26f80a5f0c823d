//! Named deployment-pattern recommendations.

use tracing::debug;

use crate::types::{DeploymentConfig, Environment};

pub const SECURE_EDGE: &str = r#"Consider "secure-edge" pattern for restricted egress"#;
pub const OBSERVABILITY_FIRST: &str = r#"Apply "observability-first" pattern for production"#;
pub const HYBRID_BRIDGE: &str = r#"Review "hybrid-bridge" pattern if on-prem connectivity needed"#;

/// Suggests deployment patterns that fit a validated config.
///
/// An explicitly empty `spec.network.egressAllowed` list suggests
/// `secure-edge`; production deployments get `observability-first`
/// followed by `hybrid-bridge`. Recommendations are independent of the
/// warnings.
///
/// # Examples
///
/// ```
/// use fde_deploy_core::{get_pattern_recommendations, validate_config};
/// use serde_json::json;
///
/// let result = validate_config(&json!({
///     "apiVersion": "fde/v1",
///     "kind": "Deployment",
///     "metadata": { "name": "api", "namespace": "edge", "environment": "development" },
///     "spec": {
///         "service": {
///             "name": "api", "image": "nginx", "port": 8080,
///             "resources": { "cpu": "1", "memory": "1Gi" }
///         },
///         "scaling": { "minReplicas": 1, "maxReplicas": 1 },
///         "rollout": { "type": "rolling" },
///         "network": { "egressAllowed": [] }
///     }
/// }));
/// let recommendations = get_pattern_recommendations(result.config().unwrap());
/// assert_eq!(recommendations.len(), 1);
/// assert!(recommendations[0].contains("secure-edge"));
/// ```
pub fn get_pattern_recommendations(config: &DeploymentConfig) -> Vec<String> {
    let mut recommendations = Vec::new();

    let egress_closed = config
        .spec
        .network
        .as_ref()
        .and_then(|network| network.egress_allowed.as_ref())
        .is_some_and(Vec::is_empty);
    if egress_closed {
        recommendations.push(SECURE_EDGE.to_string());
    }

    if config.metadata.environment == Environment::Production {
        recommendations.push(OBSERVABILITY_FIRST.to_string());
        recommendations.push(HYBRID_BRIDGE.to_string());
    }

    debug!(
        count = recommendations.len(),
        name = %config.metadata.name,
        "computed pattern recommendations"
    );
    recommendations
}

//! Advisory warnings for configs that pass the schema.
//!
//! Each rule is an independent predicate; every matching rule contributes
//! its message, in table order.

use tracing::debug;

use crate::types::{DeploymentConfig, Environment, RolloutType};

/// `maxReplicas` above this is flagged as a cost risk.
pub const HIGH_REPLICA_THRESHOLD: u64 = 10;

/// Minimum replica floor expected of production deployments.
pub const PRODUCTION_MIN_REPLICAS: u64 = 2;

struct Rule {
    name: &'static str,
    applies: fn(&DeploymentConfig) -> bool,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        name: "high-max-replicas",
        applies: high_max_replicas,
        message: "High maxReplicas (>10) may cause cost overruns",
    },
    Rule {
        name: "missing-health-check",
        applies: missing_health_check,
        message: "No health check defined - recommended for production",
    },
    Rule {
        name: "metrics-disabled",
        applies: metrics_disabled,
        message: "Metrics not enabled - recommended for production",
    },
    Rule {
        name: "production-low-min-replicas",
        applies: production_low_min_replicas,
        message: "Production deployment with minReplicas < 2",
    },
    Rule {
        name: "production-rolling-without-max-unavailable",
        applies: production_rolling_without_max_unavailable,
        message: "Production rolling update without maxUnavailable specified",
    },
];

fn is_production(config: &DeploymentConfig) -> bool {
    config.metadata.environment == Environment::Production
}

fn high_max_replicas(config: &DeploymentConfig) -> bool {
    config.spec.scaling.max_replicas > HIGH_REPLICA_THRESHOLD
}

fn missing_health_check(config: &DeploymentConfig) -> bool {
    config.spec.service.health_check.is_none()
}

fn metrics_disabled(config: &DeploymentConfig) -> bool {
    !config
        .spec
        .observability
        .as_ref()
        .is_some_and(|o| o.metrics_enabled)
}

fn production_low_min_replicas(config: &DeploymentConfig) -> bool {
    is_production(config) && config.spec.scaling.min_replicas < PRODUCTION_MIN_REPLICAS
}

// An empty `maxUnavailable` string counts as unspecified.
fn production_rolling_without_max_unavailable(config: &DeploymentConfig) -> bool {
    let rollout = &config.spec.rollout;
    is_production(config)
        && rollout.kind == RolloutType::Rolling
        && rollout.max_unavailable.as_deref().is_none_or(str::is_empty)
}

/// Computes the advisory warnings for a validated config.
///
/// # Examples
///
/// ```
/// use fde_deploy_core::{evaluate_warnings, validate_config};
/// use serde_json::json;
///
/// let result = validate_config(&json!({
///     "apiVersion": "fde/v1",
///     "kind": "Deployment",
///     "metadata": { "name": "api", "namespace": "default", "environment": "staging" },
///     "spec": {
///         "service": {
///             "name": "api", "image": "nginx", "port": 80,
///             "resources": { "cpu": "100m", "memory": "256Mi" },
///             "healthCheck": { "path": "/healthz", "port": 80 }
///         },
///         "scaling": { "minReplicas": 1, "maxReplicas": 3 },
///         "rollout": { "type": "canary" },
///         "observability": { "metricsEnabled": true }
///     }
/// }));
/// let config = result.config().unwrap();
/// assert!(evaluate_warnings(config).is_empty());
/// ```
pub fn evaluate_warnings(config: &DeploymentConfig) -> Vec<String> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(config))
        .inspect(|rule| debug!(rule = rule.name, "warning rule matched"))
        .map(|rule| rule.message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::test_support::{minimal_config, minimal_document};
    use crate::validate_config;
    use crate::types::{HealthCheck, ObservabilityConfig};

    use super::*;

    fn healthy(mut config: DeploymentConfig) -> DeploymentConfig {
        config.spec.service.health_check = Some(HealthCheck {
            path: "/health".to_string(),
            port: 80,
            initial_delay_seconds: None,
            period_seconds: None,
            timeout_seconds: None,
        });
        config.spec.observability = Some(ObservabilityConfig {
            metrics_enabled: true,
            metrics_port: None,
            tracing_enabled: None,
            logging_level: None,
        });
        config
    }

    #[test]
    fn test_independent_rules_fire_in_order() {
        let mut config = minimal_config();
        config.spec.scaling.max_replicas = 50;

        assert_eq!(
            evaluate_warnings(&config),
            vec![
                "High maxReplicas (>10) may cause cost overruns",
                "No health check defined - recommended for production",
                "Metrics not enabled - recommended for production",
            ]
        );
    }

    #[test]
    fn test_replica_threshold_is_exclusive() {
        let mut config = healthy(minimal_config());
        config.spec.scaling.max_replicas = HIGH_REPLICA_THRESHOLD;
        assert!(evaluate_warnings(&config).is_empty());
    }

    #[test]
    fn test_metrics_disabled_explicitly() {
        let mut config = healthy(minimal_config());
        if let Some(observability) = config.spec.observability.as_mut() {
            observability.metrics_enabled = false;
        }
        assert_eq!(
            evaluate_warnings(&config),
            vec!["Metrics not enabled - recommended for production"]
        );
    }

    #[test]
    fn test_production_low_replicas_and_rolling() {
        let mut config = healthy(minimal_config());
        config.metadata.environment = Environment::Production;

        let warnings = evaluate_warnings(&config);
        assert_eq!(
            warnings,
            vec![
                "Production deployment with minReplicas < 2",
                "Production rolling update without maxUnavailable specified",
            ]
        );
    }

    #[test]
    fn test_production_rolling_with_max_unavailable() {
        let mut config = healthy(minimal_config());
        config.metadata.environment = Environment::Production;
        config.spec.scaling.min_replicas = 2;
        config.spec.rollout.max_unavailable = Some("25%".to_string());
        assert!(evaluate_warnings(&config).is_empty());
    }

    #[test]
    fn test_production_empty_max_unavailable_counts_as_missing() {
        let mut config = healthy(minimal_config());
        config.metadata.environment = Environment::Production;
        config.spec.scaling.min_replicas = 3;
        config.spec.rollout.max_unavailable = Some(String::new());
        assert_eq!(
            evaluate_warnings(&config),
            vec!["Production rolling update without maxUnavailable specified"]
        );
    }

    #[test]
    fn test_production_canary_skips_rolling_rule() {
        let mut config = healthy(minimal_config());
        config.metadata.environment = Environment::Production;
        config.spec.scaling.min_replicas = 2;
        config.spec.rollout.kind = RolloutType::Canary;
        assert!(evaluate_warnings(&config).is_empty());
    }

    #[test]
    fn test_non_production_skips_production_rules() {
        let mut config = healthy(minimal_config());
        config.metadata.environment = Environment::Staging;
        config.spec.scaling.min_replicas = 1;
        assert!(evaluate_warnings(&config).is_empty());
    }

    #[test]
    fn test_validate_config_attaches_warnings() {
        let result = validate_config(&minimal_document());
        assert!(result.valid);
        assert_eq!(result.warnings, evaluate_warnings(result.config().unwrap()));
        assert!(result.warnings.iter().any(|w| w.contains("health check")));
    }
}

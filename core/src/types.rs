//! Typed model of a validated deployment configuration.
//!
//! These types are only ever produced by
//! [`validate_config`](crate::validate_config); they serialize back to the
//! document's own camelCase key names so a validated config can be echoed
//! as JSON without a separate view model.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The only accepted value of the top-level `apiVersion` key.
pub const API_VERSION: &str = "fde/v1";

/// The only accepted value of the top-level `kind` key.
pub const KIND: &str = "Deployment";

/// Image tag applied when `spec.service.tag` is omitted.
pub const DEFAULT_TAG: &str = "latest";

/// Target environment of a deployment.
///
/// # Examples
///
/// ```
/// use fde_deploy_core::Environment;
///
/// assert_eq!(Environment::from_name("staging"), Some(Environment::Staging));
/// assert_eq!(Environment::Production.to_string(), "production");
/// assert_eq!(Environment::from_name("prod"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Rollout strategy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RolloutType {
    Rolling,
    BlueGreen,
    Canary,
}

/// Application log verbosity requested by the observability block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A closed set of string values with a fixed document spelling.
pub(crate) trait NamedEnum: Copy + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == name)
    }
}

/// Implements the name table shared by the closed string enums.
///
/// `ALL` keeps declaration order, which is also the order the validator
/// lists the accepted values in when a document uses an unknown one.
macro_rules! named_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl NamedEnum for $ty {
            const ALL: &'static [$ty] = $ty::ALL;

            fn as_str(self) -> &'static str {
                $ty::as_str(self)
            }
        }

        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Returns the document spelling of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }

            /// Looks up a value by its document spelling.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == name)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum!(Environment {
    Development => "development",
    Staging => "staging",
    Production => "production",
});

named_enum!(RolloutType {
    Rolling => "rolling",
    BlueGreen => "blue-green",
    Canary => "canary",
});

named_enum!(LoggingLevel {
    Debug => "debug",
    Info => "info",
    Warn => "warn",
    Error => "error",
});

/// Validated root of a deployment configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// Always [`API_VERSION`].
    pub api_version: String,
    /// Always [`KIND`].
    pub kind: String,
    pub metadata: Metadata,
    pub spec: DeploymentSpec,
}

/// Identity and placement of the deployment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
    pub environment: Environment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

/// The `spec` block: what runs and how it scales and rolls out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    pub service: ServiceConfig,
    pub scaling: ScalingConfig,
    pub rollout: RolloutStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilityConfig>,
}

/// The container workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub name: String,
    pub image: String,
    /// Image tag, [`DEFAULT_TAG`] when the document omits it.
    pub tag: String,
    pub port: u16,
    pub resources: ResourceLimits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
}

/// Container resource limits in orchestrator quantity notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLimits {
    /// Cores or millicores, e.g. `"1"` or `"250m"`.
    pub cpu: String,
    /// Mebibytes or gibibytes, e.g. `"256Mi"` or `"2Gi"`.
    pub memory: String,
}

/// HTTP health probe. Timing fields are passed through unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub path: String,
    pub port: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,
}

/// Replica bounds and autoscaling target.
///
/// `min_replicas <= max_replicas` is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingConfig {
    pub min_replicas: u64,
    pub max_replicas: u64,
    #[serde(rename = "targetCPUUtilization", skip_serializing_if = "Option::is_none")]
    pub target_cpu_utilization: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloutStrategy {
    #[serde(rename = "type")]
    pub kind: RolloutType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canary_percentage: Option<f64>,
}

/// Allowed and blocked traffic peers. Every list is optional; an empty
/// list is distinct from an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_allowed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egress_allowed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egress_blocked: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracing_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_level: Option<LoggingLevel>,
}

/// Outcome of validating one document.
///
/// `valid` is true exactly when `errors` is empty and a config is present;
/// the constructors are the only way to build one, so the two can never
/// disagree.
///
/// # Examples
///
/// ```
/// use fde_deploy_core::validate_config;
/// use serde_json::json;
///
/// let result = validate_config(&json!({ "apiVersion": "v1" }));
/// assert!(!result.valid);
/// assert!(result.config().is_none());
/// assert!(result.errors.iter().any(|e| e.starts_with("apiVersion: ")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<DeploymentConfig>,
}

impl ValidationResult {
    /// Builds a successful result carrying the typed config.
    pub fn passed(config: DeploymentConfig, warnings: Vec<String>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings,
            config: Some(config),
        }
    }

    /// Builds a failed result. `errors` must not be empty.
    pub fn failed(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "a failed result needs at least one error");
        Self {
            valid: false,
            errors,
            warnings: Vec::new(),
            config: None,
        }
    }

    /// Returns the validated config, present only when [`valid`](Self::valid).
    pub fn config(&self) -> Option<&DeploymentConfig> {
        self.config.as_ref()
    }

    /// Consumes the result and returns the validated config, if any.
    pub fn into_config(self) -> Option<DeploymentConfig> {
        self.config
    }
}

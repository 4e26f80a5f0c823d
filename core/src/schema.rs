//! The deployment document schema.
//!
//! One function per entity, each visiting its fields in declaration order so
//! that violations come out in a stable order. Field constraints live in the
//! statics below.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::checker::{Checker, NumberRule, StringRule};
use crate::types::{
    API_VERSION, DEFAULT_TAG, DeploymentConfig, DeploymentSpec, HealthCheck, KIND, Metadata,
    NetworkPolicy, ObservabilityConfig, ResourceLimits, RolloutStrategy, ScalingConfig,
    ServiceConfig,
};

// SAFETY: These regexes are compile-time constants and are validated by tests.
static CPU_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+m?$").expect("static regex must compile"));
static MEMORY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(Mi|Gi)$").expect("static regex must compile"));

static NAME: StringRule = StringRule::non_empty();
static TEXT: StringRule = StringRule::any();
static CPU: StringRule = StringRule::matching(&CPU_PATTERN, r#"CPU must be like "100m" or "1""#);
static MEMORY: StringRule =
    StringRule::matching(&MEMORY_PATTERN, r#"Memory must be like "256Mi" or "1Gi""#);

const PORT: NumberRule = NumberRule::integer().between(1.0, 65535.0);
const REPLICAS: NumberRule = NumberRule::integer().at_least(1.0);
const UNBOUNDED_INT: NumberRule = NumberRule::integer();
const CPU_UTILIZATION: NumberRule = NumberRule::any().between(1.0, 100.0);
const PERCENTAGE: NumberRule = NumberRule::any().between(0.0, 100.0);

pub(crate) fn deployment(c: &mut Checker, doc: &Value) -> Option<DeploymentConfig> {
    let mut fields = c.object(doc)?;
    let api_version = c.required(&mut fields, "apiVersion", |c, v| c.literal(v, API_VERSION));
    let kind = c.required(&mut fields, "kind", |c, v| c.literal(v, KIND));
    let metadata = c.required(&mut fields, "metadata", metadata);
    let spec = c.required(&mut fields, "spec", spec);
    c.finish(fields);

    Some(DeploymentConfig {
        api_version: api_version?,
        kind: kind?,
        metadata: metadata?,
        spec: spec?,
    })
}

fn metadata(c: &mut Checker, value: &Value) -> Option<Metadata> {
    let mut fields = c.object(value)?;
    let name = c.required(&mut fields, "name", |c, v| c.string(v, &NAME));
    let namespace = c.required(&mut fields, "namespace", |c, v| c.string(v, &NAME));
    let environment = c.required(&mut fields, "environment", |c, v| c.one_of(v));
    let labels = c.optional(&mut fields, "labels", |c, v| c.string_map(v));
    c.finish(fields);

    Some(Metadata {
        name: name?,
        namespace: namespace?,
        environment: environment?,
        labels: labels?,
    })
}

fn spec(c: &mut Checker, value: &Value) -> Option<DeploymentSpec> {
    let mut fields = c.object(value)?;
    let service = c.required(&mut fields, "service", service);
    let scaling = c.required(&mut fields, "scaling", scaling);
    let rollout = c.required(&mut fields, "rollout", rollout);
    let network = c.optional(&mut fields, "network", network);
    let observability = c.optional(&mut fields, "observability", observability);
    c.finish(fields);

    Some(DeploymentSpec {
        service: service?,
        scaling: scaling?,
        rollout: rollout?,
        network: network?,
        observability: observability?,
    })
}

fn service(c: &mut Checker, value: &Value) -> Option<ServiceConfig> {
    let mut fields = c.object(value)?;
    let name = c.required(&mut fields, "name", |c, v| c.string(v, &NAME));
    let image = c.required(&mut fields, "image", |c, v| c.string(v, &NAME));
    let tag = c.optional(&mut fields, "tag", |c, v| c.string(v, &TEXT));
    let port = c.required(&mut fields, "port", |c, v| c.integer(v, &PORT));
    let resources = c.required(&mut fields, "resources", resources);
    let health_check = c.optional(&mut fields, "healthCheck", health_check);
    c.finish(fields);

    Some(ServiceConfig {
        name: name?,
        image: image?,
        tag: tag?.unwrap_or_else(|| DEFAULT_TAG.to_string()),
        port: u16::try_from(port?).ok()?,
        resources: resources?,
        health_check: health_check?,
    })
}

fn resources(c: &mut Checker, value: &Value) -> Option<ResourceLimits> {
    let mut fields = c.object(value)?;
    let cpu = c.required(&mut fields, "cpu", |c, v| c.string(v, &CPU));
    let memory = c.required(&mut fields, "memory", |c, v| c.string(v, &MEMORY));
    c.finish(fields);

    Some(ResourceLimits {
        cpu: cpu?,
        memory: memory?,
    })
}

fn health_check(c: &mut Checker, value: &Value) -> Option<HealthCheck> {
    let mut fields = c.object(value)?;
    let path = c.required(&mut fields, "path", |c, v| c.string(v, &TEXT));
    let port = c.required(&mut fields, "port", |c, v| c.integer(v, &UNBOUNDED_INT));
    let initial_delay_seconds =
        c.optional(&mut fields, "initialDelaySeconds", |c, v| c.integer(v, &UNBOUNDED_INT));
    let period_seconds =
        c.optional(&mut fields, "periodSeconds", |c, v| c.integer(v, &UNBOUNDED_INT));
    let timeout_seconds =
        c.optional(&mut fields, "timeoutSeconds", |c, v| c.integer(v, &UNBOUNDED_INT));
    c.finish(fields);

    Some(HealthCheck {
        path: path?,
        port: port?,
        initial_delay_seconds: initial_delay_seconds?,
        period_seconds: period_seconds?,
        timeout_seconds: timeout_seconds?,
    })
}

fn scaling(c: &mut Checker, value: &Value) -> Option<ScalingConfig> {
    let mut fields = c.object(value)?;
    let min_replicas = c.required(&mut fields, "minReplicas", |c, v| c.integer(v, &REPLICAS));
    let max_replicas = c.required(&mut fields, "maxReplicas", |c, v| c.integer(v, &REPLICAS));
    let target_cpu_utilization = c.optional(&mut fields, "targetCPUUtilization", |c, v| {
        c.number(v, &CPU_UTILIZATION)
    });
    c.finish(fields);

    Some(ScalingConfig {
        min_replicas: u64::try_from(min_replicas?).ok()?,
        max_replicas: u64::try_from(max_replicas?).ok()?,
        target_cpu_utilization: target_cpu_utilization?,
    })
}

fn rollout(c: &mut Checker, value: &Value) -> Option<RolloutStrategy> {
    let mut fields = c.object(value)?;
    let kind = c.required(&mut fields, "type", |c, v| c.one_of(v));
    let max_surge = c.optional(&mut fields, "maxSurge", |c, v| c.string(v, &TEXT));
    let max_unavailable = c.optional(&mut fields, "maxUnavailable", |c, v| c.string(v, &TEXT));
    let canary_percentage =
        c.optional(&mut fields, "canaryPercentage", |c, v| c.number(v, &PERCENTAGE));
    c.finish(fields);

    Some(RolloutStrategy {
        kind: kind?,
        max_surge: max_surge?,
        max_unavailable: max_unavailable?,
        canary_percentage: canary_percentage?,
    })
}

fn network(c: &mut Checker, value: &Value) -> Option<NetworkPolicy> {
    let mut fields = c.object(value)?;
    let ingress_allowed = c.optional(&mut fields, "ingressAllowed", |c, v| c.string_list(v));
    let egress_allowed = c.optional(&mut fields, "egressAllowed", |c, v| c.string_list(v));
    let egress_blocked = c.optional(&mut fields, "egressBlocked", |c, v| c.string_list(v));
    c.finish(fields);

    Some(NetworkPolicy {
        ingress_allowed: ingress_allowed?,
        egress_allowed: egress_allowed?,
        egress_blocked: egress_blocked?,
    })
}

fn observability(c: &mut Checker, value: &Value) -> Option<ObservabilityConfig> {
    let mut fields = c.object(value)?;
    let metrics_enabled = c.required(&mut fields, "metricsEnabled", |c, v| c.boolean(v));
    let metrics_port = c.optional(&mut fields, "metricsPort", |c, v| c.integer(v, &PORT));
    let tracing_enabled = c.optional(&mut fields, "tracingEnabled", |c, v| c.boolean(v));
    let logging_level = c.optional(&mut fields, "loggingLevel", |c, v| c.one_of(v));
    c.finish(fields);

    Some(ObservabilityConfig {
        metrics_enabled: metrics_enabled?,
        metrics_port: match metrics_port? {
            Some(port) => Some(u16::try_from(port).ok()?),
            None => None,
        },
        tracing_enabled: tracing_enabled?,
        logging_level: logging_level?,
    })
}

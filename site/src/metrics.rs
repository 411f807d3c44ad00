//! Prometheus metrics for the site.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `symposium_chat_requests_total{outcome}` - chat turns by outcome
//!   (`ok`, `rejected`, `unavailable`, `error`)
//! - `symposium_admin_actions_total{action,outcome}` - admin actions by
//!   action name and outcome (`applied`, `conflict`, `not_found`, `invalid`, `error`)
//!
//! ## Histograms
//! - `symposium_chat_model_latency_seconds` - time spent producing one assistant reply

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use symposium_core::admin::OutcomeKind;

const CHAT_REQUESTS: &str = "symposium_chat_requests_total";
const ADMIN_ACTIONS: &str = "symposium_admin_actions_total";
const CHAT_LATENCY: &str = "symposium_chat_model_latency_seconds";

/// Install the global Prometheus recorder and describe every metric.
///
/// Call once at startup.
///
/// # Errors
///
/// Fails if the bucket configuration is rejected or a recorder is already
/// installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("latency_seconds".to_string()),
            &[0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0],
        )?
        .install_recorder()?;

    register_metrics();
    Ok(handle)
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(CHAT_REQUESTS, "Chat turns handled, by outcome");
    describe_counter!(ADMIN_ACTIONS, "Admin actions handled, by action and outcome");
    describe_histogram!(CHAT_LATENCY, "Time taken to produce an assistant reply");

    tracing::info!("Site metrics registered");
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record one chat turn.
pub fn record_chat_request(outcome: &'static str) {
    metrics::counter!(CHAT_REQUESTS, "outcome" => outcome).increment(1);
}

/// Record how long the assistant took to reply.
pub fn record_chat_latency(seconds: f64) {
    metrics::histogram!(CHAT_LATENCY).record(seconds);
}

/// Record one admin action.
pub fn record_admin_action(action: &'static str, outcome: &'static str) {
    metrics::counter!(ADMIN_ACTIONS, "action" => action, "outcome" => outcome).increment(1);
}

/// Metric label for an admin outcome
#[must_use]
pub const fn outcome_label(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Applied => "applied",
        OutcomeKind::Conflict => "conflict",
        OutcomeKind::NotFound => "not_found",
        OutcomeKind::Invalid => "invalid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_recorded_metrics_render() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_chat_request("ok");
            record_admin_action("create_event", outcome_label(OutcomeKind::Conflict));
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"symposium_chat_requests_total{outcome="ok"} 1"#));
        assert!(rendered.contains(
            r#"symposium_admin_actions_total{action="create_event",outcome="conflict"} 1"#
        ));
    }
}

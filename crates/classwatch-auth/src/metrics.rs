//! Session lifecycle counters.
//!
//! Recorded through the `metrics` facade; they are no-ops until the embedding
//! application installs a recorder. Setting `CLASSWATCH_METRICS=false`
//! disables them outright.

use metrics::counter;
use std::sync::OnceLock;

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if metrics are enabled via the CLASSWATCH_METRICS env var
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("CLASSWATCH_METRICS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

pub fn track_login_success(role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("classwatch_login_total", "outcome" => "success", "role" => role.to_string())
        .increment(1);
}

pub fn track_login_failure(reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("classwatch_login_total", "outcome" => reason).increment(1);
}

/// Outcome of restoring a persisted credential at startup.
pub fn track_session_restore(outcome: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("classwatch_session_restore_total", "outcome" => outcome).increment(1);
}

pub fn track_logout() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("classwatch_logout_total").increment(1);
}

/*!
 * Tracing
 * Subscriber setup and timed spans for package boots
 */

use crate::core::limits::SLOW_BOOT_THRESHOLD_MS;
use std::time::Instant;
use tracing::{debug, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing.
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PACKBOX_TRACE_JSON: Enable JSON output (default: false)
///
/// `log` records from the policy evaluators are bridged into the subscriber.
pub fn init_tracing() {
    if let Err(e) = try_init_tracing() {
        eprintln!("tracing already initialized: {e}");
    }
}

/// Like [`init_tracing`], but reports an already-installed subscriber as an error
pub fn try_init_tracing() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("PACKBOX_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    }
}

/// Generate a unique trace ID for correlating the events of one boot
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span around the boot of one package
pub struct BootSpan {
    span: tracing::Span,
    start: Instant,
    package: String,
    trace_id: String,
}

impl BootSpan {
    pub fn new(package: &str) -> Self {
        let trace_id = generate_trace_id();
        let span = span!(
            Level::DEBUG,
            "boot",
            trace_id = %trace_id,
            package = package,
            symbols = tracing::field::Empty,
            namespaces = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        {
            let _entered = span.enter();
            debug!(package, "package boot started");
        }

        Self {
            span,
            start: Instant::now(),
            package: package.to_string(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn record_symbols(&self, symbols: usize, namespaces: usize) {
        self.span.record("symbols", symbols);
        self.span.record("namespaces", namespaces);
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
    }
}

impl Drop for BootSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration.as_millis() > SLOW_BOOT_THRESHOLD_MS {
            warn!(
                trace_id = %self.trace_id,
                package = %self.package,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow package boot"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                package = %self.package,
                duration_us = duration.as_micros() as u64,
                "package boot completed"
            );
        }
    }
}

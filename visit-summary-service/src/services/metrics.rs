//! Prometheus metrics for visit-summary-service.
//!
//! HTTP request metrics flow through the `metrics` facade into the installed
//! Prometheus recorder; model-call metrics live in a dedicated registry.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static SUMMARY_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENAI_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENAI_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static GENAI_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Install the recorder and register service metrics. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    if METRICS_HANDLE.set(handle).is_err() {
        anyhow::bail!("metrics already initialized");
    }

    let registry = Registry::new();

    let summary_requests = IntCounterVec::new(
        Opts::new(
            "summary_requests_total",
            "Day summary requests by outcome",
        ),
        &["outcome"], // success, validation_error, upstream_error
    )?;

    let tokens = IntCounterVec::new(
        Opts::new("genai_tokens_total", "Total tokens reported by the model API"),
        &["model", "type"], // type: input, output
    )?;

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "genai_provider_latency_seconds",
            "Model API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )?;

    let provider_errors = IntCounterVec::new(
        Opts::new("genai_provider_errors_total", "Total model API errors"),
        &["provider", "error_type"],
    )?;

    registry.register(Box::new(summary_requests.clone()))?;
    registry.register(Box::new(tokens.clone()))?;
    registry.register(Box::new(provider_latency.clone()))?;
    registry.register(Box::new(provider_errors.clone()))?;

    let _ = REGISTRY.set(registry);
    let _ = SUMMARY_REQUESTS_TOTAL.set(summary_requests);
    let _ = GENAI_TOKENS_TOTAL.set(tokens);
    let _ = GENAI_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = GENAI_PROVIDER_ERRORS_TOTAL.set(provider_errors);

    Ok(())
}

/// Render both expositions as Prometheus text.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = REGISTRY.get() {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
        }
        output.push_str(&String::from_utf8_lossy(&buffer));
    }

    output
}

pub fn record_summary_request(outcome: &str) {
    if let Some(counter) = SUMMARY_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

pub fn record_tokens(model: &str, input_tokens: Option<u32>, output_tokens: Option<u32>) {
    if let Some(counter) = GENAI_TOKENS_TOTAL.get() {
        if let Some(input) = input_tokens {
            counter
                .with_label_values(&[model, "input"])
                .inc_by(u64::from(input));
        }
        if let Some(output) = output_tokens {
            counter
                .with_label_values(&[model, "output"])
                .inc_by(u64::from(output));
        }
    }
}

pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = GENAI_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = GENAI_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

//! Prometheus metrics for the supply-chain node.
//!
//! All metrics follow the naming convention: `fc_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Chaincode invocations by function and outcome (ok or an error kind)
    pub static ref INVOCATIONS: CounterVec = CounterVec::new(
        Opts::new("fc_chaincode_invocations_total", "Chaincode invocations by function and outcome"),
        &["function", "outcome"]
    ).expect("metric creation failed");

    /// Money moved by settlement, by payee role
    pub static ref SETTLEMENT_VOLUME: CounterVec = CounterVec::new(
        Opts::new("fc_settlement_volume_total", "Amount credited by settlement, by payee role"),
        &["role"]
    ).expect("metric creation failed");

    /// Delay penalty applied per transfer
    pub static ref TRANSFER_PENALTY: Histogram = Histogram::with_opts(
        HistogramOpts::new("fc_transfer_penalty", "Delay penalty deducted from freight per transfer")
            .buckets(vec![0.0, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0])
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(INVOCATIONS.clone()),
        Box::new(SETTLEMENT_VOLUME.clone()),
        Box::new(TRANSFER_PENALTY.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Count one invocation. `outcome` is `ok` or the error kind.
pub fn record_invocation(function: &str, outcome: &str) {
    INVOCATIONS.with_label_values(&[function, outcome]).inc();
}

/// Add a settled payment to the volume counter. Negative amounts are ignored.
pub fn record_settlement(role: &str, amount: f64) {
    if amount > 0.0 {
        SETTLEMENT_VOLUME.with_label_values(&[role]).inc_by(amount);
    }
}

pub fn record_penalty(penalty: f64) {
    TRANSFER_PENALTY.observe(penalty);
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

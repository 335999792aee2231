//! # Fuel-Chain Telemetry
//!
//! Structured logging and Prometheus metrics shared by the node runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `fuel-chain` | Service name in log records |
//! | `FC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `FC_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `FC_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_invocation, record_penalty, record_settlement, register_metrics,
    INVOCATIONS, SETTLEMENT_VOLUME, TRANSFER_PENALTY,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics, then install the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_tracing(config)
}

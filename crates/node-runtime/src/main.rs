//! # Fuel-Chain Node
//!
//! Command-line host for the supply-chain chaincode.
//!
//! ## Startup Sequence
//!
//! 1. Parse command line
//! 2. Initialize logging and metrics
//! 3. Load configuration (env, then flags) and open the ledger file
//! 4. Run the command; each committed invocation is flushed to disk
//! 5. Optionally dump metrics

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;

use fc_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use node_runtime::cli::{Cli, Command};
use node_runtime::runner::{expand_now, invoke_recorded};
use node_runtime::simulate::{self, ScenarioOptions};
use node_runtime::{NodeConfig, NodeContainer};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    init_telemetry(&telemetry).context("failed to initialize telemetry")?;

    let mut config = NodeConfig::from_env().context("failed to load configuration")?;
    if let Some(path) = &cli.data_file {
        config.storage.data_file = path.clone();
    }

    let mut node = NodeContainer::open(config).context("failed to start node")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_file = %node.config().storage.data_file.display(),
        "[fc-node] Node ready"
    );

    let outcome = run_command(&mut node, &cli.command);

    if cli.metrics {
        eprintln!("{}", encode_metrics().context("failed to encode metrics")?);
    }
    outcome
}

fn run_command(node: &mut NodeContainer, command: &Command) -> Result<()> {
    if let Command::Simulate { rounds, seed } = command {
        let chaincode = node.config().chaincode.clone();
        let options = ScenarioOptions {
            rounds: *rounds,
            seed: *seed,
            start: Utc::now(),
        };
        let report = simulate::run(node.service_mut(), &chaincode, &options)
            .context("scenario aborted")?;

        println!(
            "{} rounds, {} transfers settled",
            report.rounds, report.transfers
        );
        for (org, balance) in &report.balances {
            println!("{:<8} {:>14.2}", org.as_str(), balance);
        }
        return Ok(());
    }

    let Some((function, args)) = command.invocation() else {
        return Ok(());
    };
    let args = expand_now(&args, Utc::now());

    let payload = invoke_recorded(node.service_mut(), &function, &args)
        .with_context(|| format!("{} failed", function))?;

    if !payload.is_empty() {
        println!("{}", String::from_utf8_lossy(&payload));
    }
    Ok(())
}

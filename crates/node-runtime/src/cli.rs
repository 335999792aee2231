//! Command-line surface of `fc-node`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fuel supply-chain ledger node
#[derive(Parser, Debug)]
#[command(name = "fc-node", version)]
#[command(about = "Run supply-chain chaincode invocations against a local ledger file")]
pub struct Cli {
    /// Ledger file (overrides FC_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the command
    #[arg(long, global = true)]
    pub metrics: bool,

    /// Debug-level logging (overrides FC_LOG_LEVEL)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Invoke a chaincode function; `now` is accepted for any timestamp
    Invoke {
        /// Function name, e.g. deliverCrude
        function: String,

        /// Ordered string arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Open every organization account (initLedger)
    Init,

    /// Print a stored record, or every record of a kind
    Query {
        /// Ledger key, e.g. Crude1 or org3
        #[arg(required_unless_present = "range", conflicts_with = "range")]
        key: Option<String>,

        /// Kind to scan: Crude, Fuel, FuelOrder or Plan
        #[arg(long, value_name = "KIND")]
        range: Option<String>,
    },

    /// Run the end-to-end supply-chain scenario and print final balances
    Simulate {
        /// Number of crude-to-retailer rounds
        #[arg(long, default_value_t = 4)]
        rounds: u32,

        /// Seed for reproducible random values
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Command {
    /// The chaincode call this command maps to, if it is a single invocation.
    pub fn invocation(&self) -> Option<(String, Vec<String>)> {
        match self {
            Command::Invoke { function, args } => Some((function.clone(), args.clone())),
            Command::Init => Some(("initLedger".to_string(), Vec::new())),
            Command::Query {
                range: Some(kind), ..
            } => Some(("queryAssetByRange".to_string(), vec![kind.clone()])),
            Command::Query { key: Some(key), .. } => {
                Some(("queryAsset".to_string(), vec![key.clone()]))
            }
            Command::Query { .. } | Command::Simulate { .. } => None,
        }
    }
}

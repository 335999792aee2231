//! Metered invocation.
//!
//! Wraps the chaincode dispatcher so every call is counted by function and
//! outcome, and every transfer feeds the settlement metrics.

use chrono::{DateTime, SecondsFormat, Utc};
use fc_02_supply_chain::dispatch::{self, ChaincodeFunction, Invocation};
use fc_02_supply_chain::{SupplyChainApi, SupplyChainError, TransferReceipt};
use fc_telemetry::{record_invocation, record_penalty, record_settlement};
use tracing::{info, warn};

/// Argument placeholder replaced by the current time.
pub const NOW: &str = "now";

/// Replace every literal `now` argument with `now` as RFC 3339.
pub fn expand_now(args: &[String], now: DateTime<Utc>) -> Vec<String> {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    args.iter()
        .map(|arg| {
            if arg == NOW {
                stamp.clone()
            } else {
                arg.clone()
            }
        })
        .collect()
}

/// Invoke `function` through the dispatcher, recording metrics and logs.
pub fn invoke_recorded<A: SupplyChainApi + ?Sized>(
    api: &mut A,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>, SupplyChainError> {
    let resolved: ChaincodeFunction = match function.parse() {
        Ok(resolved) => resolved,
        Err(err) => {
            record_invocation("unknown", err.kind().as_str());
            return Err(err);
        }
    };

    match dispatch::execute(api, resolved, args) {
        Ok(invocation) => {
            if let Invocation::Transferred(receipt) = &invocation {
                record_receipt(receipt);
            }
            record_invocation(resolved.as_str(), "ok");
            info!(function = %resolved, "[fc-node] invocation committed");
            Ok(invocation.into_payload())
        }
        Err(err) => {
            record_invocation(resolved.as_str(), err.kind().as_str());
            warn!(function = %resolved, error = %err, "[fc-node] invocation failed");
            Err(err)
        }
    }
}

fn record_receipt(receipt: &TransferReceipt) {
    record_penalty(receipt.penalty);
    for payment in &receipt.payments {
        record_settlement(payment.role.as_str(), payment.amount);
    }
}

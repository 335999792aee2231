//! One-time account creation.

use super::ledger::Ledger;
use crate::domain::config::SupplyChainConfig;
use crate::errors::SupplyChainError;
use fc_01_ledger_gateway::KeyValueStore;

/// Create every configured account with the starting balance.
///
/// The driller account doubles as the "already initialized" marker.
pub(crate) fn init_ledger<KV: KeyValueStore + ?Sized>(
    ledger: &mut Ledger<'_, KV>,
    config: &SupplyChainConfig,
) -> Result<(), SupplyChainError> {
    if ledger.exists(config.orgs.driller.as_str())? {
        return Err(SupplyChainError::conflict(
            "initLedger has already been called; the ledger is initialized",
        ));
    }

    let orgs = config.orgs.all();
    for (role, org) in &orgs {
        ledger.set_balance(org, config.initial_balance)?;
        tracing::debug!(org = %org, role = %role, "[fc-02] Account opened");
    }

    tracing::info!(
        accounts = orgs.len(),
        balance = config.initial_balance,
        "[fc-02] Ledger initialized"
    );
    Ok(())
}

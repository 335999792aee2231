//! # Supply-Chain Scenario
//!
//! Drives the full chain through the string dispatcher, the way a client
//! application would. Each round:
//!
//! 1. the driller ships `Crude<n>` to the refiner and transfers it
//! 2. the refiner produces `Fuel<n>` and places three fuel orders
//! 3. the distributor plans `Plan<n>` for the orders and delivers the first
//!
//! Quantities, values and arrival times are random; pass a seed for a
//! reproducible run. Identifiers continue after the highest one on the
//! ledger, so the scenario can be run repeatedly against the same file.

use crate::runner::invoke_recorded;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use fc_02_supply_chain::{
    AssetId, AssetKind, OrgId, SupplyChainApi, SupplyChainConfig, SupplyChainError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Orders placed per round.
pub const ORDERS_PER_ROUND: usize = 3;

#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    pub rounds: u32,
    pub seed: Option<u64>,
    /// Simulated clock at the first round.
    pub start: DateTime<Utc>,
}

/// Outcome of a completed scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub rounds: u32,
    pub transfers: usize,
    pub balances: Vec<(OrgId, f64)>,
}

pub fn run<A: SupplyChainApi + ?Sized>(
    api: &mut A,
    config: &SupplyChainConfig,
    options: &ScenarioOptions,
) -> Result<ScenarioReport, SupplyChainError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match api.query_balance(&config.orgs.driller) {
        Ok(_) => {}
        Err(SupplyChainError::NotFound(_)) => {
            invoke_recorded(api, "initLedger", &[])?;
        }
        Err(err) => return Err(err),
    }

    let orgs = &config.orgs;
    let mut batch = [AssetKind::Crude, AssetKind::Fuel, AssetKind::Plan]
        .into_iter()
        .map(|kind| next_index(api, kind))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .max()
        .unwrap_or(1);
    let mut order = next_index(api, AssetKind::FuelOrder)?;
    let mut clock = options.start;
    let mut transfers = 0;

    for _ in 0..options.rounds {
        let crude_id = format!("Crude{}", batch);
        let fuel_id = format!("Fuel{}", batch);
        let plan_id = format!("Plan{}", batch);

        invoke_recorded(
            api,
            "deliverCrude",
            &[
                crude_id.clone(),
                rng.gen_range(1..=101).to_string(),
                rng.gen_range(1..=101).to_string(),
                orgs.driller.to_string(),
                stamp(clock + Duration::seconds(rng.gen_range(1..=101))),
                orgs.driller.to_string(),
                orgs.refiner.to_string(),
                rng.gen_range(1..=1001).to_string(),
                stamp(clock),
            ],
        )?;

        invoke_recorded(
            api,
            "transfer",
            &[
                crude_id.clone(),
                orgs.refiner.to_string(),
                stamp(clock + Duration::seconds(rng.gen_range(0..=200))),
            ],
        )?;
        transfers += 1;

        invoke_recorded(
            api,
            "refine",
            &[
                fuel_id.clone(),
                rng.gen_range(1..=101).to_string(),
                rng.gen_range(1..=101).to_string(),
                orgs.refiner.to_string(),
                rng.gen_range(1..=101).to_string(),
                "fuel".to_string(),
                crude_id,
                stamp(clock),
            ],
        )?;

        let mut order_ids = Vec::with_capacity(ORDERS_PER_ROUND);
        for _ in 0..ORDERS_PER_ROUND {
            let order_id = format!("FuelOrder{}", order);
            order += 1;
            invoke_recorded(
                api,
                "addFuelOrder",
                &[
                    order_id.clone(),
                    rng.gen_range(1..=101).to_string(),
                    rng.gen_range(1..=101).to_string(),
                    orgs.refiner.to_string(),
                    pick(&mut rng, &orgs.retailers).to_string(),
                    fuel_id.clone(),
                    stamp(clock),
                ],
            )?;
            order_ids.push(order_id);
        }

        let destination = pick(&mut rng, &orgs.retailers).to_string();
        let mut plan_args = vec![plan_id.clone(), rng.gen_range(1..=10001).to_string()];
        for order_id in &order_ids {
            plan_args.extend([
                order_id.clone(),
                stamp(clock + Duration::seconds(rng.gen_range(1..=101))),
                orgs.refiner.to_string(),
                destination.clone(),
            ]);
        }
        invoke_recorded(api, "deliverFuel", &plan_args)?;

        invoke_recorded(
            api,
            "transfer",
            &[
                order_ids[0].clone(),
                pick(&mut rng, &orgs.retailers).to_string(),
                stamp(clock + Duration::seconds(rng.gen_range(0..=200))),
                plan_id,
            ],
        )?;
        transfers += 1;

        info!(batch, orders = order_ids.len(), "[fc-node] Scenario round complete");
        batch += 1;
        clock += Duration::hours(1);
    }

    let balances = orgs
        .all()
        .into_iter()
        .map(|(_, org)| Ok((org.clone(), api.query_balance(org)?)))
        .collect::<Result<Vec<_>, SupplyChainError>>()?;

    Ok(ScenarioReport {
        rounds: options.rounds,
        transfers,
        balances,
    })
}

/// One past the highest numeric suffix of `kind` on the ledger.
fn next_index<A: SupplyChainApi + ?Sized>(api: &A, kind: AssetKind) -> Result<u64, SupplyChainError> {
    let highest = api
        .query_asset_by_range(kind)?
        .iter()
        .filter_map(|entry| AssetId::parse(&entry.key).ok())
        .filter(|id| id.kind() == kind)
        .filter_map(|id| id.as_str()[kind.prefix().len()..].parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    Ok(highest + 1)
}

fn pick<'a>(rng: &mut StdRng, orgs: &'a [OrgId]) -> &'a OrgId {
    &orgs[rng.gen_range(0..orgs.len())]
}

fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

//! Argument builders for dispatcher calls.
//!
//! All times are offsets in seconds from `T0`.

use chrono::{DateTime, Duration, SecondsFormat};
use fc_01_ledger_gateway::KeyValueStore;
use fc_02_supply_chain::{invoke, Response, SupplyChainConfig, SupplyChainService};

/// Reference instant every fixture time is relative to.
pub const T0: &str = "2024-03-01T12:00:00Z";

pub fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// `T0 + offset_secs` in RFC 3339.
pub fn at(offset_secs: i64) -> String {
    let base = DateTime::parse_from_rfc3339(T0).expect("T0 is valid RFC 3339");
    (base + Duration::seconds(offset_secs)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Crude owned by org1 shipped to org3, due at `T0`.
pub fn deliver_crude(id: &str, value: f64, quantity: u64) -> Vec<String> {
    vec![
        id.to_string(),
        value.to_string(),
        quantity.to_string(),
        "org1".to_string(),
        at(0),
        "org1".to_string(),
        "org3".to_string(),
        "Vessel1".to_string(),
        at(-3600),
    ]
}

pub fn refine(fuel_id: &str, crude_id: &str) -> Vec<String> {
    vec![
        fuel_id.to_string(),
        "800".to_string(),
        "45".to_string(),
        "org3".to_string(),
        "0.85".to_string(),
        "diesel".to_string(),
        crude_id.to_string(),
        at(0),
    ]
}

pub fn add_fuel_order(order_id: &str, fuel_id: &str, value: f64, quantity: u64) -> Vec<String> {
    vec![
        order_id.to_string(),
        value.to_string(),
        quantity.to_string(),
        "org3".to_string(),
        "org5".to_string(),
        fuel_id.to_string(),
        at(0),
    ]
}

/// Plan delivering every order from org3 to org5, each due at `T0`.
pub fn deliver_fuel(plan_id: &str, order_ids: &[&str]) -> Vec<String> {
    let mut out = vec![plan_id.to_string(), "Truck1".to_string()];
    for order_id in order_ids {
        out.extend([
            order_id.to_string(),
            at(0),
            "org3".to_string(),
            "org5".to_string(),
        ]);
    }
    out
}

pub fn transfer(asset_id: &str, new_owner: &str, offset_secs: i64, plan_id: Option<&str>) -> Vec<String> {
    let mut out = vec![asset_id.to_string(), new_owner.to_string(), at(offset_secs)];
    out.extend(plan_id.map(str::to_string));
    out
}

/// Invoke and panic with the error message on failure.
pub fn must<KV: KeyValueStore>(
    service: &mut SupplyChainService<KV>,
    function: &str,
    args: &[String],
) -> Vec<u8> {
    match invoke(service, function, args) {
        Response::Success(payload) => payload,
        Response::Error(message) => panic!("{} failed: {}", function, message),
    }
}

/// Service over `store` with every account opened.
pub fn initialized<KV: KeyValueStore>(store: KV) -> SupplyChainService<KV> {
    let mut service = SupplyChainService::new(store, SupplyChainConfig::default());
    must(&mut service, "initLedger", &[]);
    service
}

pub fn balance<KV: KeyValueStore>(service: &mut SupplyChainService<KV>, org: &str) -> f64 {
    let payload = must(service, "queryBalance", &args(&[org]));
    serde_json::from_slice(&payload).expect("balance payload is a JSON number")
}

pub fn record<KV: KeyValueStore>(service: &mut SupplyChainService<KV>, key: &str) -> serde_json::Value {
    let payload = must(service, "queryAsset", &args(&[key]));
    serde_json::from_slice(&payload).expect("record payload is JSON")
}

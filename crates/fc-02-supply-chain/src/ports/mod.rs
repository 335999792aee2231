//! # Ports Layer
//!
//! - `inbound.rs` - Driving port (`SupplyChainApi`) and its typed requests
//!
//! The driven port is `fc_01_ledger_gateway::KeyValueStore`.

pub mod inbound;

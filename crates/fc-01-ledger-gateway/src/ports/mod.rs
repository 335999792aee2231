//! # Ports Layer
//!
//! - `outbound.rs` - Driven port implemented by the host ledger

pub mod outbound;

//! # Fuel-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Argument builders shared by tests and benches
//! └── integration/      # End-to-end flows through the dispatcher
//!     ├── flows.rs      # Lifecycle, settlement and query properties
//!     └── persistence.rs# File-backed ledger behaviour
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fc-tests
//! cargo test -p fc-tests integration::persistence
//!
//! # Benchmarks
//! cargo bench -p fc-tests
//! ```

pub mod fixtures;
pub mod integration;

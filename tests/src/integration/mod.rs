//! End-to-end flows through the string dispatcher.

pub mod flows;
pub mod persistence;

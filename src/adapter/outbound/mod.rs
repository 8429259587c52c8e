//! Outbound adapters (driven side).

pub mod cheapshark;
pub mod memory;
pub mod notifier;
pub mod sqlite;

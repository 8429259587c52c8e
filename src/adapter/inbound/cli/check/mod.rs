//! Configuration and deals API check command handlers.

pub mod config;
pub mod deals;

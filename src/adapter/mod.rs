//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] drives the application (the `freegames` CLI).
//! - [`outbound`] is driven by it (deals API, storage, chat backend).

pub mod inbound;
pub mod outbound;

//! Infrastructure configuration modules.

pub mod discord;
pub mod logging;
pub mod poller;
pub mod settings;

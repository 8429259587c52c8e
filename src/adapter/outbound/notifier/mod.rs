//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for chat backends.

#[cfg(feature = "discord")]
pub mod discord;

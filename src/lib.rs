//! Freegames - posts free game deals from CheapShark into Discord channels.
//!
//! A background poller asks the deals API for zero-priced games and posts the
//! first one to every guild that has opted in, throttled by a per-guild
//! cooldown and de-duplicated against the last deal posted. Guild admins
//! configure the bot with `!freegames ...` chat commands.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Storefronts, deals and per-guild targets
//! - [`port`] - Traits for the deal source, target store and notifier
//! - [`application`] - Deal checks, the poller and the chat command service
//! - [`adapter`] - CheapShark client, SQLite and in-memory stores, Discord, CLI
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `discord` (default) - Discord gateway and REST notifier via serenity
//!
//! # Example
//!
//! ```no_run
//! use freegames::infrastructure::bootstrap;
//! use freegames::infrastructure::config::settings::Config;
//!
//! # async fn example() -> freegames::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! config.init_logging();
//! bootstrap::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

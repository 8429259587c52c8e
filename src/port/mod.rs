//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  DealCheck · Poller ·   │
//!                    │     CommandService      │
//!                    └───────────┬─────────────┘
//!          ┌─────────────────────┼─────────────────────┐
//!          ▼                     ▼                     ▼
//!   ┌─────────────┐       ┌─────────────┐       ┌───────────┐
//!   │ DealSource  │       │ TargetStore │       │ Notifier  │
//!   │ (CheapShark)│       │  (SQLite)   │       │ (Discord) │
//!   └─────────────┘       └─────────────┘       └───────────┘
//! ```

pub mod outbound;

pub use outbound::deals::DealSource;
pub use outbound::notifier::{DealNotice, LogNotifier, NoticeField, Notifier};
pub use outbound::store::TargetStore;

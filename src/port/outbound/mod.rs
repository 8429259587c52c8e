//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the upstream deal listing, target persistence
//! and the chat backend that receives notices.

pub mod deals;
pub mod notifier;
pub mod store;

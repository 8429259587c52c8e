//! CheapShark deals API integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::CheapSharkClient;
pub use settings::CheapSharkConfig;

//! Shared fakes for integration tests.
#![allow(dead_code)]

pub mod recording_notifier;
pub mod scripted_source;
pub mod temp_db;

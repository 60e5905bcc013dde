//! Terminal tracker for daily drills, mood check-ins, journal and gratitude
//! entries. Everything lives in a small on-disk key-value store, no accounts
//! and no network required.
//!

pub mod cli;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;

//! Configuration module for gst-ledger
//!
//! - Base/data directory resolution
//! - User settings persistence, including the GST rate table

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;

//! Configuration management
//!
//! This module handles process-level settings for the ledger: mining
//! difficulty, the persisted-document path, and the signature scheme.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};

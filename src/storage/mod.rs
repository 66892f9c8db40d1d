//! Data storage and persistence
//!
//! This module holds the pending-transaction pool and the save/load pair
//! for the ledger's single-document durable form.

pub mod pending_pool;
pub mod persistence;

pub use pending_pool::PendingPool;
pub use persistence::{load_from_file, save_to_file, LEDGER_FILE};

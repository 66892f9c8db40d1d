//! # Provenance Chain - Product-Authenticity Ledger
//!
//! A single-node append-only ledger that records product-authenticity
//! events (manufacturer registrations and product registrations) as
//! transactions grouped into proof-of-work-sealed blocks.
//!
//! ## How the code is organized
//! - `core/`: the ledger engine (transactions, blocks, Merkle commitment,
//!   proof-of-work sealing, chain validation)
//! - `registry/`: manufacturer key issuance and the pluggable signer
//! - `storage/`: pending-transaction pool and the persisted JSON document
//! - `config/`: environment-driven process settings
//! - `utils/`: hashing and the canonical JSON encoder
//! - `cli/`: command-line interface standing in for the original web layer
//!
//! ## Integrity model
//! Every content hash commits to a canonical JSON serialization: product ids
//! to their record, transaction ids to timestamp plus record, Merkle leaves
//! to whole transactions, and block hashes to every header field plus the
//! transaction list. Tampering anywhere breaks `Ledger::validate`.
//!
//! The manufacturer signatures are NOT part of that integrity model by
//! default: the placeholder scheme's `verify` only checks string lengths,
//! mirroring the reference system. Chain-hash invariants are the actual
//! tamper-evidence mechanism. A real ECDSA signer can be selected via
//! configuration where genuine signatures are wanted.
//!
//! Persistence trusts stored hashes on load; `validate()` after loading is
//! what detects a tampered file.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod registry;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    Block, Ledger, LedgerSnapshot, LedgerStats, MerkleTree, ProductProvenance, ProductRecord,
    ProductSummary, ProofOfWork, Transaction, GENESIS_PREVIOUS_HASH, UNSIGNED_MARKER,
};
pub use error::{LedgerError, Result};
pub use registry::{KeyRegistry, ManufacturerEntry, SignatureScheme, Signer};
pub use storage::{load_from_file, save_to_file, PendingPool, LEDGER_FILE};
pub use utils::{canonical_json, canonical_json_without_key, current_timestamp, sha256_hex};

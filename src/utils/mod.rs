//! Utility functions and helpers
//!
//! This module contains the hashing primitives and the canonical JSON
//! encoder used everywhere a structure is hashed.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, random_hex_32, sha256_digest, sha256_hex, DIGEST_HEX_LEN};
pub use serialization::{canonical_json, canonical_json_without_key};

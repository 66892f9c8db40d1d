//! Manufacturer identity registry
//!
//! Issues per-manufacturer key pairs and fronts the pluggable signing
//! capability. The default signer reproduces the reference placeholder
//! scheme; real ECDSA signatures are available as a configured alternative.

pub mod keys;
pub mod signer;

pub use keys::{KeyRegistry, ManufacturerEntry};
pub use signer::{EcdsaSigner, PlaceholderSigner, SignatureScheme, Signer};

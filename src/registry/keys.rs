use crate::error::{LedgerError, Result};
use crate::registry::{SignatureScheme, Signer};
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One manufacturer's identity as the registry stores it.
///
/// The private key is stored in the clear alongside the public key. This is
/// the reference design's deliberately preserved weakness; a hardened
/// deployment would keep private keys out of the registry entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerEntry {
    name: String,
    public_key: String,
    private_key: String,
    registered_at: i64,
}

impl ManufacturerEntry {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_public_key(&self) -> &str {
        &self.public_key
    }

    pub fn get_private_key(&self) -> &str {
        &self.private_key
    }

    pub fn get_registered_at(&self) -> i64 {
        self.registered_at
    }
}

/// Issues and stores per-manufacturer key pairs, and fronts the configured
/// signer for sign/verify calls.
pub struct KeyRegistry {
    entries: BTreeMap<String, ManufacturerEntry>,
    signer: Box<dyn Signer>,
}

impl std::fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl KeyRegistry {
    pub fn new(scheme: SignatureScheme) -> KeyRegistry {
        KeyRegistry {
            entries: BTreeMap::new(),
            signer: scheme.create_signer(),
        }
    }

    /// Rebuild a registry from persisted entries. Stored key material is
    /// taken verbatim.
    pub fn from_entries(
        entries: BTreeMap<String, ManufacturerEntry>,
        scheme: SignatureScheme,
    ) -> KeyRegistry {
        KeyRegistry {
            entries,
            signer: scheme.create_signer(),
        }
    }

    /// Register a manufacturer. Idempotent: an already-registered name
    /// returns its existing entry unchanged.
    pub fn register(&mut self, name: &str) -> Result<&ManufacturerEntry> {
        if !self.entries.contains_key(name) {
            let (private_key, public_key) = self.signer.generate_keypair()?;
            let entry = ManufacturerEntry {
                name: name.to_string(),
                public_key,
                private_key,
                registered_at: current_timestamp()?,
            };
            self.entries.insert(name.to_string(), entry);
        }

        self.entries
            .get(name)
            .ok_or_else(|| LedgerError::Registry(format!("Manufacturer not found: {name}")))
    }

    pub fn get(&self, name: &str) -> Option<&ManufacturerEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &ManufacturerEntry> {
        self.entries.values()
    }

    /// Clone of the backing map, in the persisted document's shape.
    pub fn to_entries(&self) -> BTreeMap<String, ManufacturerEntry> {
        self.entries.clone()
    }

    pub fn sign(&self, data: &str, private_key: &str) -> Result<String> {
        self.signer.sign(data, private_key)
    }

    pub fn verify(&self, data: &str, signature: &str, public_key: &str) -> bool {
        self.signer.verify(data, signature, public_key)
    }
}

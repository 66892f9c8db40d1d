// The ledger owns the chain, the pending pool, and the manufacturer
// registry, and orchestrates mining and validation. It is an explicit owned
// value: every operation goes through a handle to it, never a process-wide
// singleton.

use crate::core::{
    verify_block_hash, Block, ProductRecord, ProofOfWork, Transaction, UNSIGNED_MARKER,
};
use crate::error::{LedgerError, Result};
use crate::registry::{KeyRegistry, ManufacturerEntry, SignatureScheme};
use crate::storage::PendingPool;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reward tracked per mined block. No consumer reads it; kept for parity
/// with the persisted reference behavior.
const MINING_REWARD: f64 = 1.0;

/// A product record as returned by a successful lookup, enriched with where
/// in the chain it was found.
#[derive(Debug, Clone, Serialize)]
pub struct ProductProvenance {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub block_index: u64,
    pub block_hash: String,
    pub transaction_id: String,
    pub is_authentic: bool,
    pub confirmed_blocks: u64,
}

/// A product record as returned by the full listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub block_index: u64,
    pub transaction_id: String,
}

/// Chain-wide counters plus a freshly computed validity flag.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerStats {
    pub total_blocks: usize,
    pub total_transactions: usize,
    /// Total transactions minus one (the genesis transaction). Signed: a
    /// chain whose genesis carries no transactions reports -1.
    pub total_products: i64,
    pub difficulty: u32,
    pub registered_manufacturers: usize,
    pub pending_transactions: usize,
    pub chain_valid: bool,
}

/// The ledger's durable form: exactly the three top-level fields of the
/// persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub chain: Vec<Block>,
    pub manufacturers: BTreeMap<String, ManufacturerEntry>,
    pub difficulty: u32,
}

#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: PendingPool,
    registry: KeyRegistry,
    difficulty: u32,
    mining_reward: f64,
}

impl Ledger {
    /// Fresh ledger with the reference placeholder signature scheme.
    pub fn new(difficulty: u32) -> Result<Ledger> {
        Self::with_scheme(difficulty, SignatureScheme::Placeholder)
    }

    /// Fresh ledger with an explicit signature scheme. The genesis block is
    /// synthesized here; the chain is never empty afterwards.
    pub fn with_scheme(difficulty: u32, scheme: SignatureScheme) -> Result<Ledger> {
        let genesis_tx = Transaction::new(ProductRecord::genesis()?, UNSIGNED_MARKER.to_string())?;
        let genesis = Block::genesis(genesis_tx)?;

        Ok(Ledger {
            chain: vec![genesis],
            pending: PendingPool::new(),
            registry: KeyRegistry::new(scheme),
            difficulty,
            mining_reward: MINING_REWARD,
        })
    }

    /// Register a manufacturer, generating a key pair on first sight.
    /// Idempotent.
    pub fn register_manufacturer(&mut self, name: &str) -> Result<ManufacturerEntry> {
        Ok(self.registry.register(name)?.clone())
    }

    /// Build, sign, and queue one product-registration transaction. Returns
    /// the derived product id. The chain is untouched; only the pending
    /// pool grows. No duplicate detection is performed - byte-identical
    /// submissions are queued, mined, and later found first-match-wins.
    pub fn submit_transaction(
        &mut self,
        product_name: &str,
        manufacturer: &str,
        batch_number: &str,
        manufacture_date: &str,
        private_key: Option<&str>,
    ) -> Result<String> {
        // Auto-register unseen manufacturers
        self.registry.register(manufacturer)?;

        let record = ProductRecord::new(product_name, manufacturer, batch_number, manufacture_date)?;
        let product_id = record.get_product_id().to_string();

        let signature = match private_key {
            Some(key) => self.registry.sign(&record.signing_payload()?, key)?,
            None => UNSIGNED_MARKER.to_string(),
        };

        let transaction = Transaction::new(record, signature)?;
        self.pending.add(transaction);

        Ok(product_id)
    }

    /// Seal the pending pool into a new block. With nothing pending this is
    /// a no-op returning `None` - never an empty block.
    ///
    /// The pool snapshot taken here is exactly what the block commits to;
    /// only that prefix is removed afterwards, so submissions landing
    /// mid-mine stay queued for the next block.
    pub fn mine(&mut self) -> Result<Option<Block>> {
        let snapshot = self.pending.snapshot();
        if snapshot.is_empty() {
            return Ok(None);
        }

        let index = self.chain.len() as u64;
        let previous_hash = self
            .chain
            .last()
            .map(|block| block.get_hash().to_string())
            .ok_or_else(|| LedgerError::Block("Chain has no tail block".to_string()))?;

        let sealed_count = snapshot.len();
        let mut block = Block::new(index, snapshot, previous_hash)?;

        info!("Mining block {index} at difficulty {}", self.difficulty);
        let pow = ProofOfWork::new(self.difficulty);
        pow.seal(&mut block)?;
        info!("Block {index} sealed: {}", block.get_hash());

        self.chain.push(block.clone());
        self.pending.remove_prefix(sealed_count);

        Ok(Some(block))
    }

    /// Walk the chain from index 1 and check, per block: the link to the
    /// previous block, the Merkle commitment, the block hash, and proof of
    /// work. Short-circuits with a reason naming the offending block. An
    /// empty or genesis-only chain is trivially valid.
    pub fn validate(&self) -> (bool, String) {
        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let previous = &self.chain[i - 1];

            if current.get_previous_hash() != previous.get_hash() {
                return (false, format!("Block {i} has invalid previous hash link"));
            }

            match current.verify_merkle_root() {
                Ok(true) => {}
                _ => return (false, format!("Block {i} has invalid Merkle root")),
            }

            match verify_block_hash(current) {
                Ok(true) => {}
                _ => {
                    return (
                        false,
                        format!("Block {i} has been tampered with (hash mismatch)"),
                    )
                }
            }

            if !ProofOfWork::validate(current, self.difficulty) {
                return (false, format!("Block {i} has invalid proof of work"));
            }
        }

        (true, "valid".to_string())
    }

    /// Scan the whole chain (genesis included) in order and return the
    /// first transaction carrying this product id. Multiple matches are
    /// possible (duplicate submissions are legal); first-found wins -
    /// unresolved behavior to confirm with stakeholders before changing.
    pub fn find_product(&self, product_id: &str) -> Option<ProductProvenance> {
        let chain_length = self.chain.len() as u64;
        for block in &self.chain {
            for transaction in block.get_transactions() {
                if transaction.get_product_data().get_product_id() == product_id {
                    return Some(ProductProvenance {
                        product: transaction.get_product_data().clone(),
                        block_index: block.get_index(),
                        block_hash: block.get_hash().to_string(),
                        transaction_id: transaction.get_transaction_id().to_string(),
                        is_authentic: true,
                        confirmed_blocks: chain_length - block.get_index(),
                    });
                }
            }
        }
        None
    }

    /// Every product transaction in chain order, genesis excluded.
    pub fn list_products(&self) -> Vec<ProductSummary> {
        let mut products = Vec::new();
        for block in &self.chain {
            if block.get_index() == 0 {
                continue;
            }
            for transaction in block.get_transactions() {
                products.push(ProductSummary {
                    product: transaction.get_product_data().clone(),
                    block_index: block.get_index(),
                    transaction_id: transaction.get_transaction_id().to_string(),
                });
            }
        }
        products
    }

    /// Registered manufacturers in name order.
    pub fn list_manufacturers(&self) -> Vec<ManufacturerEntry> {
        self.registry.entries().cloned().collect()
    }

    pub fn get_block_by_index(&self, index: usize) -> Option<&Block> {
        self.chain.get(index)
    }

    pub fn get_latest_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    pub fn get_chain(&self) -> &[Block] {
        self.chain.as_slice()
    }

    pub fn chain_length(&self) -> usize {
        self.chain.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn get_mining_reward(&self) -> f64 {
        self.mining_reward
    }

    pub fn get_manufacturer(&self, name: &str) -> Option<&ManufacturerEntry> {
        self.registry.get(name)
    }

    /// Chain-wide counters. `chain_valid` is a full re-validation on every
    /// call, never a cached flag.
    pub fn stats(&self) -> LedgerStats {
        let total_transactions: usize = self
            .chain
            .iter()
            .map(|block| block.get_transactions().len())
            .sum();

        LedgerStats {
            total_blocks: self.chain.len(),
            total_transactions,
            total_products: total_transactions as i64 - 1,
            difficulty: self.difficulty,
            registered_manufacturers: self.registry.len(),
            pending_transactions: self.pending.len(),
            chain_valid: self.validate().0,
        }
    }

    /// The ledger's durable form. The pending pool is deliberately absent:
    /// only mined state persists.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            chain: self.chain.clone(),
            manufacturers: self.registry.to_entries(),
            difficulty: self.difficulty,
        }
    }

    /// Rebuild a ledger from its durable form.
    ///
    /// Stored block hashes and Merkle roots are trusted verbatim - loading
    /// succeeds even for a tampered document. "Loaded" is not "verified":
    /// callers that care must invoke `validate()` on the result.
    pub fn from_snapshot(snapshot: LedgerSnapshot, scheme: SignatureScheme) -> Result<Ledger> {
        if snapshot.chain.is_empty() {
            return Err(LedgerError::Persistence(
                "Persisted chain contains no blocks".to_string(),
            ));
        }

        Ok(Ledger {
            chain: snapshot.chain,
            pending: PendingPool::new(),
            registry: KeyRegistry::from_entries(snapshot.manufacturers, scheme),
            difficulty: snapshot.difficulty,
            mining_reward: MINING_REWARD,
        })
    }

    /// Test-only access for tamper-detection tests.
    #[cfg(test)]
    pub(crate) fn chain_mut(&mut self) -> &mut Vec<Block> {
        &mut self.chain
    }
}

use crate::core::{MerkleTree, Transaction};
use crate::error::Result;
use crate::utils::{canonical_json_without_key, current_timestamp, sha256_hex};
use serde::{Deserialize, Serialize};

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// One sealed unit of the chain: header fields, the ordered transaction
/// list, and the Merkle commitment over it.
///
/// The Merkle root is computed once from the transaction list at
/// construction and never recomputed implicitly. The block hash commits to
/// every field except itself and is recomputed whenever the nonce changes
/// during mining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: i64,
    transactions: Vec<Transaction>,
    previous_hash: String,
    nonce: u64,
    merkle_root: String,
    hash: String,
}

impl Block {
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: String) -> Result<Block> {
        let merkle_root = MerkleTree::build_root(&transactions)?;

        let mut block = Block {
            index,
            timestamp: current_timestamp()?,
            transactions,
            previous_hash,
            nonce: 0,
            merkle_root,
            hash: String::new(),
        };
        block.hash = block.calculate_hash()?;
        Ok(block)
    }

    /// Synthetic first block. Not mined; chain validation starts at index 1.
    pub fn genesis(transaction: Transaction) -> Result<Block> {
        Block::new(0, vec![transaction], GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Digest of the canonical block with the `hash` field removed.
    pub fn calculate_hash(&self) -> Result<String> {
        let canonical = canonical_json_without_key(self, "hash")?;
        Ok(sha256_hex(canonical.as_bytes()))
    }

    /// Install a nonce and recompute the hash from it. Only the miner calls
    /// this; after sealing, the nonce is frozen.
    pub fn apply_nonce(&mut self, nonce: u64) -> Result<()> {
        self.nonce = nonce;
        self.hash = self.calculate_hash()?;
        Ok(())
    }

    /// Recompute the Merkle root from the current transaction list and
    /// compare against the committed one.
    pub fn verify_merkle_root(&self) -> Result<bool> {
        Ok(MerkleTree::build_root(&self.transactions)? == self.merkle_root)
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_merkle_root(&self) -> &str {
        &self.merkle_root
    }

    pub fn get_hash(&self) -> &str {
        &self.hash
    }

    /// Test-only access for tamper-detection tests.
    #[cfg(test)]
    pub(crate) fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }

    /// Test-only override of the stored hash.
    #[cfg(test)]
    pub(crate) fn set_hash(&mut self, hash: String) {
        self.hash = hash;
    }
}

/// Validation helper: a block deserialized from persisted state keeps its
/// stored `hash` and `merkle_root` verbatim; this checks whether the stored
/// hash still matches the content it claims to commit to.
pub fn verify_block_hash(block: &Block) -> Result<bool> {
    Ok(block.calculate_hash()? == block.get_hash())
}

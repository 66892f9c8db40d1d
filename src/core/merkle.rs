use crate::core::Transaction;
use crate::error::{LedgerError, Result};
use crate::utils::{canonical_json, sha256_hex};

/// Merkle commitment over an ordered transaction list.
///
/// This is a simplified scheme, kept for compatibility with the persisted
/// chain format: leaves are SHA-256 digests of each transaction's canonical
/// JSON, an odd level duplicates its last hash, and a parent is the digest of
/// the two child *hex strings* concatenated (not raw bytes). A single-leaf
/// list reduces to that leaf's own hash.
pub struct MerkleTree;

impl MerkleTree {
    /// Calculate the Merkle root for an ordered list of transactions.
    ///
    /// An empty list commits to a fixed sentinel (the digest of `"empty"`),
    /// so empty content is deterministic and distinguishable from any real
    /// transaction set.
    pub fn build_root(transactions: &[Transaction]) -> Result<String> {
        if transactions.is_empty() {
            return Ok(sha256_hex(b"empty"));
        }

        let mut level: Vec<String> = Vec::with_capacity(transactions.len());
        for tx in transactions {
            level.push(sha256_hex(canonical_json(tx)?.as_bytes()));
        }

        while level.len() > 1 {
            if level.len() % 2 != 0 {
                // Duplicate the last hash, never pad with zeros
                if let Some(last) = level.last().cloned() {
                    level.push(last);
                }
            }

            let mut next_level = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks(2) {
                let combined = format!("{}{}", pair[0], pair[1]);
                next_level.push(sha256_hex(combined.as_bytes()));
            }
            level = next_level;
        }

        level
            .pop()
            .ok_or_else(|| LedgerError::Block("Merkle reduction produced no root".to_string()))
    }

    /// Leaf hash of a single transaction, exposed so validation and tests can
    /// check the single-leaf identity without rebuilding a list.
    pub fn leaf_hash(transaction: &Transaction) -> Result<String> {
        Ok(sha256_hex(canonical_json(transaction)?.as_bytes()))
    }
}

use crate::core::Block;
use crate::error::{LedgerError, Result};
use data_encoding::HEXLOWER;
use num_bigint::{BigInt, Sign};
use std::ops::ShlAssign;

const MAX_NONCE: u64 = u64::MAX;

/// Nonce search against a difficulty target.
///
/// Difficulty counts required leading zero hex digits in the block hash. The
/// target is kept as a big integer, `1 << (256 - 4 * difficulty)`: a digest
/// is strictly below it exactly when its top `difficulty` hex digits are
/// zero, so the integer compare and the string-prefix rule agree bit for bit.
pub struct ProofOfWork {
    target: BigInt,
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> ProofOfWork {
        let mut target = BigInt::from(1);
        // difficulty is clamped at 64 hex digits; beyond that the target
        // stays 1 and only the all-zero digest would satisfy it
        target.shl_assign(256usize.saturating_sub(4 * difficulty as usize));
        ProofOfWork { target, difficulty }
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Whether a hex digest satisfies the difficulty target.
    pub fn meets_target(&self, hash_hex: &str) -> Result<bool> {
        let bytes = HEXLOWER
            .decode(hash_hex.as_bytes())
            .map_err(|e| LedgerError::Mining(format!("Block hash is not valid hex: {e}")))?;
        let hash_int = BigInt::from_bytes_be(Sign::Plus, bytes.as_slice());
        Ok(hash_int < self.target)
    }

    /// Re-check a sealed block against a difficulty. Any error (a digest
    /// that is not hex at all) counts as failing the target.
    pub fn validate(block: &Block, difficulty: u32) -> bool {
        let pow = ProofOfWork::new(difficulty);
        pow.meets_target(block.get_hash()).unwrap_or(false)
    }

    /// Seal a block: scan nonces upward from the block's current nonce until
    /// the hash satisfies the target. Unbounded by construction - expected
    /// iteration count grows exponentially with difficulty.
    pub fn seal(&self, block: &mut Block) -> Result<()> {
        if self.seal_bounded(block, MAX_NONCE)? {
            Ok(())
        } else {
            Err(LedgerError::Mining(
                "Nonce space exhausted before meeting the difficulty target".to_string(),
            ))
        }
    }

    /// Bounded variant of the same search, testing at most `max_iterations`
    /// nonces. Returns whether a satisfying nonce was found; on `false` the
    /// block keeps the last nonce tried, and a later call resumes from it.
    pub fn seal_bounded(&self, block: &mut Block, max_iterations: u64) -> Result<bool> {
        let mut nonce = block.get_nonce();
        let mut tested: u64 = 0;

        while tested < max_iterations {
            block.apply_nonce(nonce)?;
            if self.meets_target(block.get_hash())? {
                return Ok(true);
            }
            tested += 1;
            nonce = match nonce.checked_add(1) {
                Some(next) => next,
                None => return Ok(false),
            };
        }

        Ok(false)
    }
}

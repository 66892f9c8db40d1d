use ring::digest::{Context, SHA256};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::{LedgerError, Result};
use data_encoding::HEXLOWER;
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| LedgerError::Crypto(format!("System time error: {e}")))?
        .as_millis();

    // Ensure the timestamp fits in i64
    if duration > i64::MAX as u128 {
        return Err(LedgerError::Crypto("Timestamp overflow".to_string()));
    }

    Ok(duration as i64)
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// SHA-256 digest, lowercase hex encoded. Every content hash in the ledger
/// (product ids, transaction ids, Merkle leaves, block hashes) goes through
/// this one function.
pub fn sha256_hex(data: &[u8]) -> String {
    HEXLOWER.encode(sha256_digest(data).as_slice())
}

/// 32 cryptographically random bytes, hex encoded (64 chars).
pub fn random_hex_32() -> Result<String> {
    let rng = SystemRandom::new();
    let mut buf = [0u8; 32];
    rng.fill(&mut buf)
        .map_err(|e| LedgerError::Crypto(format!("Failed to generate random bytes: {e}")))?;
    Ok(HEXLOWER.encode(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_is_deterministic() {
        let a = sha256_hex(b"hello");
        let b = sha256_hex(b"hello");
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_sha256_hex_empty_input_known_vector() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(sha256_hex(b"empty"), sha256_hex(b"Empty"));
    }

    #[test]
    fn test_random_hex_32_length_and_uniqueness() {
        let a = random_hex_32().unwrap();
        let b = random_hex_32().unwrap();
        assert_eq!(a.len(), DIGEST_HEX_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_current_timestamp_is_monotonic_enough() {
        let t1 = current_timestamp().unwrap();
        let t2 = current_timestamp().unwrap();
        assert!(t2 >= t1);
        assert!(t1 > 0);
    }
}

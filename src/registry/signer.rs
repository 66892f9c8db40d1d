use crate::error::{LedgerError, Result};
use crate::utils::{random_hex_32, sha256_hex, DIGEST_HEX_LEN};
use data_encoding::HEXLOWER;
use ring::rand::SystemRandom;
use ring::signature::{
    EcdsaKeyPair, KeyPair, UnparsedPublicKey, ECDSA_P256_SHA256_FIXED,
    ECDSA_P256_SHA256_FIXED_SIGNING,
};
use std::str::FromStr;

/// Signing capability behind the manufacturer registry.
///
/// Key material crosses this trait as hex strings because that is the form
/// the persisted ledger document stores.
pub trait Signer: Send + Sync {
    /// Generate a fresh key pair, returned as `(private_key, public_key)`.
    fn generate_keypair(&self) -> Result<(String, String)>;

    /// Sign canonical data with a private key.
    fn sign(&self, data: &str, private_key: &str) -> Result<String>;

    /// Check a signature over canonical data against a public key.
    fn verify(&self, data: &str, signature: &str, public_key: &str) -> bool;
}

/// Which signer implementation a ledger uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// Hash-derived keys with a length-only verification check (default,
    /// matches the reference behavior).
    Placeholder,
    /// Real ECDSA P-256 signatures. Hardened alternative; chains written
    /// with one scheme do not verify under the other.
    Ecdsa,
}

impl SignatureScheme {
    pub fn create_signer(&self) -> Box<dyn Signer> {
        match self {
            SignatureScheme::Placeholder => Box::new(PlaceholderSigner),
            SignatureScheme::Ecdsa => Box::new(EcdsaSigner),
        }
    }
}

impl FromStr for SignatureScheme {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<SignatureScheme> {
        match s.to_lowercase().as_str() {
            "placeholder" => Ok(SignatureScheme::Placeholder),
            "ecdsa" => Ok(SignatureScheme::Ecdsa),
            other => Err(LedgerError::Config(format!(
                "Unknown signature scheme: {other}. Valid options: placeholder, ecdsa"
            ))),
        }
    }
}

/// The reference scheme: private key is 32 random bytes, public key is the
/// digest of the private key, and a signature is the digest of data plus
/// private key.
///
/// `verify` only checks that signature and public key are 64 hex chars.
/// This is NOT a real signature check: any tampering that preserves lengths
/// passes it. The chain-hash invariants, not signatures, are the actual
/// tamper-evidence mechanism. Kept deliberately; `SignatureScheme::Ecdsa`
/// is the hardened alternative.
pub struct PlaceholderSigner;

impl Signer for PlaceholderSigner {
    fn generate_keypair(&self) -> Result<(String, String)> {
        let private_key = random_hex_32()?;
        let public_key = sha256_hex(private_key.as_bytes());
        Ok((private_key, public_key))
    }

    fn sign(&self, data: &str, private_key: &str) -> Result<String> {
        let combined = format!("{data}{private_key}");
        Ok(sha256_hex(combined.as_bytes()))
    }

    fn verify(&self, _data: &str, signature: &str, public_key: &str) -> bool {
        signature.len() == DIGEST_HEX_LEN && public_key.len() == DIGEST_HEX_LEN
    }
}

/// ECDSA P-256 signatures over the canonical bytes. The private key is a
/// hex-encoded PKCS#8 document, the public key the hex-encoded point.
pub struct EcdsaSigner;

impl Signer for EcdsaSigner {
    fn generate_keypair(&self) -> Result<(String, String)> {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &rng)
            .map_err(|e| LedgerError::Crypto(format!("Failed to generate ECDSA key pair: {e}")))?;
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8.as_ref(), &rng)
                .map_err(|e| {
                    LedgerError::Crypto(format!("Failed to create key pair from PKCS8: {e}"))
                })?;
        let private_key = HEXLOWER.encode(pkcs8.as_ref());
        let public_key = HEXLOWER.encode(key_pair.public_key().as_ref());
        Ok((private_key, public_key))
    }

    fn sign(&self, data: &str, private_key: &str) -> Result<String> {
        let pkcs8 = HEXLOWER
            .decode(private_key.as_bytes())
            .map_err(|e| LedgerError::Crypto(format!("Private key is not valid hex: {e}")))?;
        let rng = SystemRandom::new();
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8.as_ref(), &rng)
                .map_err(|e| {
                    LedgerError::Crypto(format!("Failed to create key pair from PKCS8: {e}"))
                })?;
        let signature = key_pair
            .sign(&rng, data.as_bytes())
            .map_err(|e| LedgerError::Crypto(format!("Failed to sign data: {e}")))?;
        Ok(HEXLOWER.encode(signature.as_ref()))
    }

    fn verify(&self, data: &str, signature: &str, public_key: &str) -> bool {
        let Ok(public_key) = HEXLOWER.decode(public_key.as_bytes()) else {
            return false;
        };
        let Ok(signature) = HEXLOWER.decode(signature.as_bytes()) else {
            return false;
        };
        let peer_public_key = UnparsedPublicKey::new(&ECDSA_P256_SHA256_FIXED, public_key);
        peer_public_key
            .verify(data.as_bytes(), signature.as_slice())
            .is_ok()
    }
}

// Transactions record one product-authenticity event each. A transaction is
// immutable after construction: its id commits to the timestamp and the full
// product record, so any later mutation is detectable by rehashing.

use crate::error::Result;
use crate::utils::{canonical_json, canonical_json_without_key, current_timestamp, sha256_hex};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Signature marker for transactions submitted without a private key.
pub const UNSIGNED_MARKER: &str = "unsigned";

/// One product's registration data.
///
/// `product_id` is derived from every other field: the digest of the record's
/// canonical JSON with the `product_id` key removed. Two submissions with
/// byte-identical fields (including the millisecond `registration_time`)
/// therefore collide; the ledger does not deduplicate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    product_name: String,
    manufacturer: String,
    batch_number: String,
    manufacture_date: String,
    registration_time: i64,
    product_id: String,
}

impl ProductRecord {
    /// Assemble a record and derive its product id.
    pub fn new(
        product_name: &str,
        manufacturer: &str,
        batch_number: &str,
        manufacture_date: &str,
    ) -> Result<ProductRecord> {
        let mut record = ProductRecord {
            product_name: product_name.to_string(),
            manufacturer: manufacturer.to_string(),
            batch_number: batch_number.to_string(),
            manufacture_date: manufacture_date.to_string(),
            registration_time: current_timestamp()?,
            product_id: String::new(),
        };
        record.product_id = record.derive_product_id()?;
        Ok(record)
    }

    /// Record used inside the synthetic genesis transaction.
    pub(crate) fn genesis() -> Result<ProductRecord> {
        Ok(ProductRecord {
            product_name: "Genesis Block".to_string(),
            manufacturer: "System".to_string(),
            batch_number: "GENESIS-001".to_string(),
            manufacture_date: "2025-01-01".to_string(),
            registration_time: current_timestamp()?,
            product_id: "genesis".to_string(),
        })
    }

    /// Digest of the canonical record minus the `product_id` field itself.
    fn derive_product_id(&self) -> Result<String> {
        let canonical = canonical_json_without_key(self, "product_id")?;
        Ok(sha256_hex(canonical.as_bytes()))
    }

    /// Canonical JSON of the full record (id included) - the exact bytes a
    /// manufacturer signs.
    pub fn signing_payload(&self) -> Result<String> {
        canonical_json(self)
    }

    pub fn get_product_name(&self) -> &str {
        &self.product_name
    }

    pub fn get_manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn get_batch_number(&self) -> &str {
        &self.batch_number
    }

    pub fn get_manufacture_date(&self) -> &str {
        &self.manufacture_date
    }

    pub fn get_registration_time(&self) -> i64 {
        self.registration_time
    }

    pub fn get_product_id(&self) -> &str {
        &self.product_id
    }

    /// Test-only field mutator for tamper-detection tests.
    #[cfg(test)]
    pub(crate) fn set_product_name(&mut self, name: &str) {
        self.product_name = name.to_string();
    }
}

/// Immutable record of one product event.
///
/// Owned by the pending pool before mining and by exactly one block after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    transaction_id: String,
    timestamp: i64,
    product_data: ProductRecord,
    manufacturer_signature: String,
}

impl Transaction {
    pub fn new(product_data: ProductRecord, manufacturer_signature: String) -> Result<Transaction> {
        let timestamp = current_timestamp()?;
        let transaction_id = Self::derive_id(timestamp, &product_data)?;
        Ok(Transaction {
            transaction_id,
            timestamp,
            product_data,
            manufacturer_signature,
        })
    }

    /// Transaction id = digest of canonical {timestamp, product_data}.
    fn derive_id(timestamp: i64, product_data: &ProductRecord) -> Result<String> {
        let payload = json!({
            "timestamp": timestamp,
            "product_data": serde_json::to_value(product_data)?,
        });
        Ok(sha256_hex(payload.to_string().as_bytes()))
    }

    /// Recompute the id from current contents; diverges from
    /// `get_transaction_id` only if the transaction was tampered with.
    pub fn recompute_id(&self) -> Result<String> {
        Self::derive_id(self.timestamp, &self.product_data)
    }

    pub fn get_transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_product_data(&self) -> &ProductRecord {
        &self.product_data
    }

    pub fn get_manufacturer_signature(&self) -> &str {
        &self.manufacturer_signature
    }

    pub fn is_signed(&self) -> bool {
        self.manufacturer_signature != UNSIGNED_MARKER
    }

    /// Test-only access for tamper-detection tests.
    #[cfg(test)]
    pub(crate) fn product_data_mut(&mut self) -> &mut ProductRecord {
        &mut self.product_data
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Deterministic-enough fixture shared by core unit tests.
    pub(crate) fn sample_transaction(tag: &str) -> Transaction {
        let record = ProductRecord::new(
            &format!("Widget-{tag}"),
            "Acme",
            &format!("B-{tag}"),
            "2025-01-01",
        )
        .unwrap();
        Transaction::new(record, UNSIGNED_MARKER.to_string()).unwrap()
    }

    #[test]
    fn test_product_id_commits_to_all_fields() {
        let record = ProductRecord::new("Widget", "Acme", "B1", "2025-01-01").unwrap();
        let expected = sha256_hex(
            canonical_json_without_key(&record, "product_id")
                .unwrap()
                .as_bytes(),
        );
        assert_eq!(record.get_product_id(), expected);
    }

    #[test]
    fn test_different_fields_give_different_product_ids() {
        let a = ProductRecord::new("Widget", "Acme", "B1", "2025-01-01").unwrap();
        let b = ProductRecord::new("Widget", "Acme", "B2", "2025-01-01").unwrap();
        assert_ne!(a.get_product_id(), b.get_product_id());
    }

    #[test]
    fn test_transaction_id_matches_recomputation() {
        let tx = sample_transaction("x");
        assert_eq!(tx.get_transaction_id(), tx.recompute_id().unwrap());
    }

    #[test]
    fn test_tampering_product_data_breaks_id() {
        let mut tx = sample_transaction("x");
        tx.product_data_mut().set_product_name("Counterfeit");
        assert_ne!(tx.get_transaction_id(), tx.recompute_id().unwrap());
    }

    #[test]
    fn test_unsigned_marker() {
        let tx = sample_transaction("x");
        assert!(!tx.is_signed());
        assert_eq!(tx.get_manufacturer_signature(), UNSIGNED_MARKER);
    }
}

use crate::core::Transaction;
use std::sync::RwLock;

/// Ordered pool of transactions awaiting mining.
///
/// Order is submission order and duplicates are legal; both survive into the
/// mined block. Mining takes a snapshot, seals it, then removes exactly that
/// prefix, so submissions that arrive while a block is being sealed stay
/// queued for the next block.
#[derive(Debug)]
pub struct PendingPool {
    inner: RwLock<Vec<Transaction>>,
}

impl Default for PendingPool {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingPool {
    pub fn new() -> PendingPool {
        PendingPool {
            inner: RwLock::new(Vec::new()),
        }
    }

    pub fn add(&self, tx: Transaction) {
        match self.inner.write() {
            Ok(mut pool) => pool.push(tx),
            Err(_) => {
                log::error!("Failed to acquire write lock on pending pool");
            }
        }
    }

    /// Copy of the current pool contents, in submission order.
    pub fn snapshot(&self) -> Vec<Transaction> {
        match self.inner.read() {
            Ok(pool) => pool.clone(),
            Err(_) => {
                log::error!("Failed to acquire read lock on pending pool");
                Vec::new()
            }
        }
    }

    /// Drop the first `count` transactions - the ones a successful mine just
    /// sealed. Anything submitted after the snapshot stays pending.
    pub fn remove_prefix(&self, count: usize) {
        match self.inner.write() {
            Ok(mut pool) => {
                let count = count.min(pool.len());
                pool.drain(..count);
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on pending pool");
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.inner.read() {
            Ok(pool) => pool.len(),
            Err(_) => {
                log::error!("Failed to acquire read lock on pending pool");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.inner.read() {
            Ok(pool) => pool.is_empty(),
            Err(_) => {
                log::error!("Failed to acquire read lock on pending pool");
                true // Conservative default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::tests::sample_transaction;

    #[test]
    fn test_pool_preserves_submission_order() {
        let pool = PendingPool::new();
        pool.add(sample_transaction("a"));
        pool.add(sample_transaction("b"));

        let snapshot = pool.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot[0].get_product_data().get_product_name(),
            "Widget-a"
        );
        assert_eq!(
            snapshot[1].get_product_data().get_product_name(),
            "Widget-b"
        );
    }

    #[test]
    fn test_duplicates_are_legal() {
        let pool = PendingPool::new();
        let tx = sample_transaction("dup");
        pool.add(tx.clone());
        pool.add(tx);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_remove_prefix_keeps_later_submissions() {
        let pool = PendingPool::new();
        pool.add(sample_transaction("a"));
        pool.add(sample_transaction("b"));
        let snapshot = pool.snapshot();

        // A submission arriving after the snapshot was taken
        pool.add(sample_transaction("late"));

        pool.remove_prefix(snapshot.len());
        let remaining = pool.snapshot();
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining[0].get_product_data().get_product_name(),
            "Widget-late"
        );
    }

    #[test]
    fn test_remove_prefix_clamps_to_length() {
        let pool = PendingPool::new();
        pool.add(sample_transaction("a"));
        pool.remove_prefix(10);
        assert!(pool.is_empty());
    }
}

use crate::{Hash256, ShortHash};
use serde::{Deserialize, Serialize};

/// The slice of a transaction the synchronizer observes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: Hash256,
    pub fee_multiplier: u32,
    /// Serialized size of the full entity in bytes.
    pub entity_size: u32,
}

impl Transaction {
    /// The truncated hash identifying this transaction in short-hash sets.
    pub fn short_hash(&self) -> ShortHash {
        ShortHash::from_hash(&self.hash)
    }
}

/// An ordered sequence of transactions pulled from a peer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionRange {
    transactions: Vec<Transaction>,
}

impl TransactionRange {
    pub fn new(transactions: Vec<Transaction>) -> TransactionRange {
        TransactionRange { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of entity sizes across the range, in bytes.
    pub fn total_size(&self) -> u64 {
        self.transactions
            .iter()
            .map(|transaction| u64::from(transaction.entity_size))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }
}

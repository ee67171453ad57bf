use async_trait::async_trait;
use containers::{ShortHash, TransactionRange};

use crate::error::ApiError;

/// Read access to a peer's unconfirmed transaction cache.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Unconfirmed transactions the peer holds, excluding those whose short
    /// hashes appear in `known_short_hashes`.
    async fn unconfirmed_transactions(
        &self,
        known_short_hashes: Vec<ShortHash>,
    ) -> Result<TransactionRange, ApiError>;
}

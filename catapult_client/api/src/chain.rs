use async_trait::async_trait;
use containers::{BlockRange, ChainScore, Hash256, Height};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Snapshot of a chain tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub height: Height,
    pub score: ChainScore,
}

/// Caps applied to a single `blocks_from` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlocksFromOptions {
    /// Maximum number of blocks the responder may return.
    pub num_blocks: u32,
    /// Maximum total bytes the responder may return.
    pub num_bytes: u32,
}

/// Read access to a block chain, local or remote.
///
/// Abstracts the transport so the synchronizer can be tested with mocks.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Height and score of the chain tip.
    async fn chain_info(&self) -> Result<ChainInfo, ApiError>;

    /// Block hashes starting at `height`, at most `max_hashes` of them.
    async fn hashes_from(&self, height: Height, max_hashes: u32)
        -> Result<Vec<Hash256>, ApiError>;

    /// Blocks starting at `height`, bounded by `options`.
    ///
    /// A responder may return fewer blocks than the caps allow; an empty
    /// range means it has nothing at or above `height`.
    async fn blocks_from(
        &self,
        height: Height,
        options: BlocksFromOptions,
    ) -> Result<BlockRange, ApiError>;
}

use serde::{Deserialize, Serialize};

/// Operational parameters for the chain synchronizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSynchronizerConfiguration {
    /// Upper bound on blocks examined by chain comparison per round.
    pub max_blocks_per_sync_attempt: u32,

    /// Byte cap for a single remote block request.
    pub max_chain_bytes_per_sync_attempt: u32,

    /// Upper bound on blocks pulled per remote request. Also bounds how deep
    /// a fork can be and still be resolved by rollback.
    pub max_rollback_blocks: u32,
}

impl ChainSynchronizerConfiguration {
    /// Admission threshold for bytes handed downstream but not yet processed.
    pub fn max_unprocessed_bytes(&self) -> u64 {
        3 * u64::from(self.max_chain_bytes_per_sync_attempt)
    }
}

impl Default for ChainSynchronizerConfiguration {
    fn default() -> Self {
        Self {
            max_blocks_per_sync_attempt: 400,
            max_chain_bytes_per_sync_attempt: 10 * 1024 * 1024,
            max_rollback_blocks: 360,
        }
    }
}

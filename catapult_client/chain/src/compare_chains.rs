use std::cmp::max;
use std::fmt;

use api::{ApiError, ChainApi};
use containers::{Hash256, Height};
use futures::try_join;
use tracing::debug;

/// Verdict of comparing the local chain against a remote peer's chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainComparisonCode {
    /// Both chains report the same cumulative score.
    RemoteReportedEqualChainScore,

    /// The remote chain scores lower; it has nothing for us.
    RemoteReportedLowerChainScore,

    /// The remote chain scores higher and shares a recent common block; a
    /// pull from the common height can make progress.
    RemoteIsNotSynced,

    /// The remote chain diverges deeper than the rollback limit allows.
    RemoteIsForked,

    /// The remote claims a higher score but its chain trails the local tip
    /// by more than the rollback limit.
    RemoteIsTooFarBehind,

    /// The remote claims a higher score but returned no hashes past the
    /// common block.
    RemoteReportedHigherChainScoreButNoHashes,

    /// The remote returned more hashes than were requested.
    RemoteReturnedTooManyHashes,
}

impl ChainComparisonCode {
    /// True for verdicts indicating peer misbehavior or a useless response.
    pub fn is_malicious_or_error(self) -> bool {
        !matches!(
            self,
            ChainComparisonCode::RemoteReportedEqualChainScore
                | ChainComparisonCode::RemoteReportedLowerChainScore
                | ChainComparisonCode::RemoteIsNotSynced
        )
    }
}

impl fmt::Display for ChainComparisonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChainComparisonCode::RemoteReportedEqualChainScore => {
                "remote reported equal chain score"
            }
            ChainComparisonCode::RemoteReportedLowerChainScore => {
                "remote reported lower chain score"
            }
            ChainComparisonCode::RemoteIsNotSynced => "remote is not synced",
            ChainComparisonCode::RemoteIsForked => "remote is forked",
            ChainComparisonCode::RemoteIsTooFarBehind => "remote is too far behind",
            ChainComparisonCode::RemoteReportedHigherChainScoreButNoHashes => {
                "remote reported higher chain score but no hashes"
            }
            ChainComparisonCode::RemoteReturnedTooManyHashes => "remote returned too many hashes",
        };
        f.write_str(label)
    }
}

/// Bounds applied to one chain comparison.
#[derive(Clone, Copy, Debug)]
pub struct CompareChainsOptions {
    /// Maximum hashes examined when searching for the common block.
    pub max_blocks_to_analyze: u32,
    /// Deepest fork the local chain is willing to roll back.
    pub max_blocks_to_rewrite: u32,
}

/// Result of a chain comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompareChainsResult {
    pub code: ChainComparisonCode,

    /// Height of the last block both chains share. Meaningful only when
    /// `code` is `RemoteIsNotSynced`.
    pub common_block_height: Height,

    /// Number of local blocks past the common block that a pull must
    /// replace. Positive only when a rollback is required.
    pub fork_depth: u64,
}

impl CompareChainsResult {
    fn terminal(code: ChainComparisonCode) -> CompareChainsResult {
        CompareChainsResult {
            code,
            common_block_height: Height(0),
            fork_depth: 0,
        }
    }
}

/// Compare the local chain against a remote peer's chain.
///
/// Fetches both tips first; only when the remote claims a higher score are
/// the hash chains walked to locate the last common block inside the
/// rollback window.
pub async fn compare_chains(
    local: &dyn ChainApi,
    remote: &dyn ChainApi,
    options: CompareChainsOptions,
) -> Result<CompareChainsResult, ApiError> {
    let (local_info, remote_info) = try_join!(local.chain_info(), remote.chain_info())?;

    debug!(
        local_height = %local_info.height,
        local_score = %local_info.score,
        remote_height = %remote_info.height,
        remote_score = %remote_info.score,
        "comparing chains"
    );

    if remote_info.score == local_info.score {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteReportedEqualChainScore,
        ));
    }

    if remote_info.score < local_info.score {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteReportedLowerChainScore,
        ));
    }

    let rewrite_limit = u64::from(options.max_blocks_to_rewrite);
    if remote_info.height.0 + rewrite_limit < local_info.height.0 {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteIsTooFarBehind,
        ));
    }

    compare_hashes(local, remote, options, local_info.height).await
}

async fn compare_hashes(
    local: &dyn ChainApi,
    remote: &dyn ChainApi,
    options: CompareChainsOptions,
    local_height: Height,
) -> Result<CompareChainsResult, ApiError> {
    let rewrite_limit = u64::from(options.max_blocks_to_rewrite);
    let start_height = max(Height(1), local_height.saturating_sub(rewrite_limit));
    let max_hashes = options.max_blocks_to_analyze;

    let (local_hashes, remote_hashes) = try_join!(
        local.hashes_from(start_height, max_hashes),
        remote.hashes_from(start_height, max_hashes)
    )?;

    if remote_hashes.len() > max_hashes as usize {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteReturnedTooManyHashes,
        ));
    }

    let first_difference = first_difference_index(&local_hashes, &remote_hashes);

    // The very first hash differs: the chains diverge before the rollback
    // window even starts.
    if 0 == first_difference {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteIsForked,
        ));
    }

    // The remote chain is a (possibly equal) prefix of the local chain, yet
    // it claimed a higher score.
    if first_difference == remote_hashes.len() {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteReportedHigherChainScoreButNoHashes,
        ));
    }

    let common_block_height = Height(start_height.0 + first_difference as u64 - 1);
    let fork_depth = local_height.0 - common_block_height.0;
    if fork_depth > rewrite_limit {
        return Ok(CompareChainsResult::terminal(
            ChainComparisonCode::RemoteIsForked,
        ));
    }

    Ok(CompareChainsResult {
        code: ChainComparisonCode::RemoteIsNotSynced,
        common_block_height,
        fork_depth,
    })
}

fn first_difference_index(local_hashes: &[Hash256], remote_hashes: &[Hash256]) -> usize {
    local_hashes
        .iter()
        .zip(remote_hashes.iter())
        .position(|(local, remote)| local != remote)
        .unwrap_or_else(|| local_hashes.len().min(remote_hashes.len()))
}

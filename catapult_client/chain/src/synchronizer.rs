use std::sync::Arc;

use api::{ApiError, BlocksFromOptions, ChainApi, RemoteApi};
use tracing::{debug, warn};

use crate::block_puller;
use crate::compare_chains::{
    compare_chains, ChainComparisonCode, CompareChainsOptions, CompareChainsResult,
};
use crate::config::ChainSynchronizerConfiguration;
use crate::consumers::{
    CompletionAwareBlockRangeConsumer, ShortHashesSupplier, TransactionRangeConsumer,
};
use crate::node_interaction::NodeInteractionResult;
use crate::unprocessed_elements::UnprocessedElements;

/// Reconciles the local chain with one remote peer per call.
///
/// Each peer gets its own synchronizer; at most one round runs at a time per
/// instance. Block pulls request at most `max_rollback_blocks` blocks per
/// request so that even a reply that turns out to be a fork of the real
/// chain is still resolvable by rollback.
pub struct ChainSynchronizer {
    local_chain_api: Arc<dyn ChainApi>,
    compare_chains_options: CompareChainsOptions,
    blocks_from_options: BlocksFromOptions,
    short_hashes_supplier: ShortHashesSupplier,
    transaction_range_consumer: TransactionRangeConsumer,
    pub(crate) unprocessed: Arc<UnprocessedElements>,
}

impl ChainSynchronizer {
    pub fn new(
        local_chain_api: Arc<dyn ChainApi>,
        config: &ChainSynchronizerConfiguration,
        short_hashes_supplier: ShortHashesSupplier,
        block_range_consumer: Arc<dyn CompletionAwareBlockRangeConsumer>,
        transaction_range_consumer: TransactionRangeConsumer,
    ) -> ChainSynchronizer {
        ChainSynchronizer {
            local_chain_api,
            compare_chains_options: CompareChainsOptions {
                max_blocks_to_analyze: config.max_blocks_per_sync_attempt,
                max_blocks_to_rewrite: config.max_rollback_blocks,
            },
            blocks_from_options: BlocksFromOptions {
                num_blocks: config.max_rollback_blocks,
                num_bytes: config.max_chain_bytes_per_sync_attempt,
            },
            short_hashes_supplier,
            transaction_range_consumer,
            unprocessed: UnprocessedElements::new(
                block_range_consumer,
                config.max_unprocessed_bytes(),
            ),
        }
    }

    /// Run one sync round against `remote`.
    ///
    /// Resolves `Neutral` without contacting the peer when the round cannot
    /// start (another round in flight, pipeline saturated or draining). All
    /// peer-sourced errors are demoted to `Failure`; the sync gate is
    /// released whatever the outcome.
    pub async fn synchronize(&self, remote: &RemoteApi) -> NodeInteractionResult {
        if !self.unprocessed.should_start_sync() {
            return NodeInteractionResult::Neutral;
        }

        let result = self.sync_with_peer(remote).await;

        // mark the current sync as completed
        self.unprocessed.clear_pending_sync();
        result
    }

    async fn sync_with_peer(&self, remote: &RemoteApi) -> NodeInteractionResult {
        let compare_result = match self.compare_chains(remote).await {
            Ok(compare_result) => compare_result,
            Err(err) => {
                debug!(%err, "error while comparing chains");
                return NodeInteractionResult::Failure;
            }
        };

        match compare_result.code {
            ChainComparisonCode::RemoteReportedEqualChainScore => {
                self.pull_unconfirmed_transactions(remote).await
            }

            ChainComparisonCode::RemoteIsNotSynced => {
                debug!(
                    common_block_height = %compare_result.common_block_height,
                    fork_depth = compare_result.fork_depth,
                    "pulling blocks from remote"
                );
                block_puller::chain_blocks_from(
                    remote.chain_api.as_ref(),
                    self.blocks_from_options,
                    compare_result.common_block_height + 1,
                    compare_result.fork_depth,
                    &self.unprocessed,
                )
                .await
            }

            code => {
                let result = to_node_interaction_result(code);
                if NodeInteractionResult::Failure == result {
                    warn!(%code, "node interaction failed");
                }

                result
            }
        }
    }

    // When unprocessed elements exist a previous round already established
    // divergence; bypass comparison and expand the existing chain part by
    // pulling more blocks past its end.
    async fn compare_chains(&self, remote: &RemoteApi) -> Result<CompareChainsResult, ApiError> {
        if self.unprocessed.is_empty() {
            return compare_chains(
                self.local_chain_api.as_ref(),
                remote.chain_api.as_ref(),
                self.compare_chains_options,
            )
            .await;
        }

        Ok(CompareChainsResult {
            code: ChainComparisonCode::RemoteIsNotSynced,
            common_block_height: self.unprocessed.max_height(),
            fork_depth: 0,
        })
    }

    async fn pull_unconfirmed_transactions(&self, remote: &RemoteApi) -> NodeInteractionResult {
        let known_short_hashes = (self.short_hashes_supplier)();
        match remote
            .transaction_api
            .unconfirmed_transactions(known_short_hashes)
            .await
        {
            Ok(range) => {
                debug!(
                    num_transactions = range.len(),
                    "peer returned unconfirmed transactions"
                );
                (self.transaction_range_consumer)(range);
                NodeInteractionResult::Neutral
            }
            Err(err) => {
                debug!(%err, "error while requesting unconfirmed transactions");
                NodeInteractionResult::Failure
            }
        }
    }
}

fn to_node_interaction_result(code: ChainComparisonCode) -> NodeInteractionResult {
    if code.is_malicious_or_error() {
        NodeInteractionResult::Failure
    } else {
        NodeInteractionResult::Neutral
    }
}

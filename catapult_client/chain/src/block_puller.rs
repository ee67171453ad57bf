use std::sync::Arc;

use api::{BlocksFromOptions, ChainApi};
use containers::Height;
use tracing::debug;

use crate::node_interaction::NodeInteractionResult;
use crate::range_aggregator::RangeAggregator;
use crate::unprocessed_elements::UnprocessedElements;

/// Pull blocks from `chain_api` starting at `start_height` until the peer
/// stops sending or `fork_depth` blocks have accumulated, then hand the
/// merged range to `unprocessed`.
///
/// A peer may return fewer blocks than the per-request caps allow; only an
/// empty reply or a satisfied fork depth ends the pull. With `fork_depth`
/// of zero any non-empty reply completes the pull.
pub async fn chain_blocks_from(
    chain_api: &dyn ChainApi,
    options: BlocksFromOptions,
    start_height: Height,
    fork_depth: u64,
    unprocessed: &Arc<UnprocessedElements>,
) -> NodeInteractionResult {
    let mut aggregator = RangeAggregator::new();
    let mut height = start_height;

    loop {
        let range = match chain_api.blocks_from(height, options).await {
            Ok(range) => range,
            Err(err) => {
                debug!(%err, "error while requesting blocks");
                return NodeInteractionResult::Failure;
            }
        };

        if range.is_empty() {
            debug!("peer returned 0 blocks");
            break;
        }

        let end_height = range.last().expect("range is not empty").height;
        debug!(
            num_blocks = range.len(),
            start_height = %range.first().expect("range is not empty").height,
            end_height = %end_height,
            "peer returned blocks"
        );

        aggregator.add(range);
        if fork_depth <= aggregator.num_blocks() as u64 {
            break;
        }

        height = end_height + 1;
    }

    complete(aggregator, unprocessed)
}

fn complete(
    aggregator: RangeAggregator,
    unprocessed: &Arc<UnprocessedElements>,
) -> NodeInteractionResult {
    if aggregator.is_empty() {
        return NodeInteractionResult::Neutral;
    }

    if unprocessed.add(aggregator.merge()) {
        NodeInteractionResult::Success
    } else {
        NodeInteractionResult::Neutral
    }
}

//! Chain synchronizer for the node.
//!
//! Reconciles the local block chain with a remote peer's chain by comparing
//! scores and hashes, then pulling block ranges in bounded batches and
//! feeding them into the downstream consumer pipeline. It includes:
//!
//! - **Unprocessed Elements**: Tracks bytes handed downstream but not yet
//!   processed and gates whether a new sync round may start
//! - **Chain Comparison**: Classifies the remote chain against the local one
//! - **Block Puller**: Iteratively pulls blocks until the peer stops sending
//!   or the fork depth is satisfied
//! - **Chain Synchronizer**: Coordinates one sync round end to end
//!
//! ## Sync round
//!
//! 1. Claim the sync gate; refuse the round if another is in flight, the
//!    pipeline is saturated, or an abnormal completion is draining
//! 2. Compare chains, or expand the existing fetch when elements are already
//!    in flight
//! 3. Equal score: pull unconfirmed transactions. Not synced: pull blocks
//!    from the common height. Everything else maps to a terminal result
//! 4. Release the gate, whatever the outcome

pub mod block_puller;
pub mod compare_chains;
pub mod config;
pub mod consumers;
pub mod node_interaction;
pub mod range_aggregator;
pub mod synchronizer;
pub mod unprocessed_elements;

pub use compare_chains::{
    compare_chains, ChainComparisonCode, CompareChainsOptions, CompareChainsResult,
};
pub use config::ChainSynchronizerConfiguration;
pub use consumers::{
    CompletionAwareBlockRangeConsumer, CompletionHandler, CompletionStatus, ElementId,
    ShortHashesSupplier, TransactionRangeConsumer,
};
pub use node_interaction::NodeInteractionResult;
pub use range_aggregator::RangeAggregator;
pub use synchronizer::ChainSynchronizer;
pub use unprocessed_elements::UnprocessedElements;

#[cfg(test)]
mod tests;

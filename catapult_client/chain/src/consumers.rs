use std::sync::Arc;

use containers::{BlockRange, ShortHash, TransactionRange};

/// Opaque handle the downstream pipeline assigns to a submitted range.
pub type ElementId = u64;

/// Terminal status the pipeline reports for a submitted range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionStatus {
    /// The range was fully processed.
    Normal,
    /// The range was rejected or failed mid-pipeline.
    Aborted,
}

/// Callback correlating a completion report with a prior submission.
pub type CompletionHandler = Box<dyn FnOnce(ElementId, CompletionStatus) + Send>;

/// Downstream pipeline entry point for pulled block ranges.
///
/// `push` must assign and return an element id without blocking on
/// processing and without invoking `on_complete` re-entrantly; the caller
/// may hold internal locks across the call. Completion must be reported
/// exactly once per submission, asynchronously, and in submission order.
pub trait CompletionAwareBlockRangeConsumer: Send + Sync {
    fn push(&self, range: BlockRange, on_complete: CompletionHandler) -> ElementId;
}

/// Sink for unconfirmed transactions pulled from a peer.
pub type TransactionRangeConsumer = Arc<dyn Fn(TransactionRange) + Send + Sync>;

/// Supplies short hashes of the locally known unconfirmed transactions so a
/// peer can elide redundant transfer.
pub type ShortHashesSupplier = Arc<dyn Fn() -> Vec<ShortHash> + Send + Sync>;

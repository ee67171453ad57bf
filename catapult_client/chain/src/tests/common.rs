//! Common test utilities: deterministic chains and mock collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use api::{ApiError, BlocksFromOptions, ChainApi, ChainInfo, RemoteApi, TransactionApi};
use async_trait::async_trait;
use containers::{
    Block, BlockRange, ChainScore, Hash256, Height, ShortHash, Transaction, TransactionRange,
};
use parking_lot::Mutex;

use crate::config::ChainSynchronizerConfiguration;
use crate::consumers::{
    CompletionAwareBlockRangeConsumer, CompletionHandler, CompletionStatus, ElementId,
    ShortHashesSupplier, TransactionRangeConsumer,
};

pub const TEST_BLOCK_SIZE: u32 = 100;

pub fn test_config() -> ChainSynchronizerConfiguration {
    ChainSynchronizerConfiguration {
        max_blocks_per_sync_attempt: 100,
        max_chain_bytes_per_sync_attempt: 10_000,
        max_rollback_blocks: 40,
    }
}

/// Deterministic hash for the block at `height` on `branch`.
pub fn chain_hash(height: u64, branch: u8) -> Hash256 {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&height.to_le_bytes());
    bytes[8] = branch;
    Hash256(bytes)
}

/// Hash chain for heights `1..=height`, diverging onto `branch` for all
/// heights above `fork_height`.
pub fn hash_chain(height: u64, fork_height: u64, branch: u8) -> Vec<Hash256> {
    (1..=height)
        .map(|h| chain_hash(h, if h > fork_height { branch } else { 0 }))
        .collect()
}

pub fn test_block(height: u64) -> Block {
    Block {
        height: Height(height),
        previous_block_hash: chain_hash(height - 1, 0),
        transactions_hash: Hash256::default(),
        difficulty: 1,
        entity_size: TEST_BLOCK_SIZE,
    }
}

pub fn block_range(start_height: u64, num_blocks: u64) -> BlockRange {
    BlockRange::new((start_height..start_height + num_blocks).map(test_block).collect())
}

pub fn test_transaction(seed: u8) -> Transaction {
    let mut bytes = [0u8; 32];
    bytes[0] = seed;
    Transaction {
        hash: Hash256(bytes),
        fee_multiplier: 100,
        entity_size: 128,
    }
}

pub fn transaction_range(num_transactions: u8) -> TransactionRange {
    TransactionRange::new((0..num_transactions).map(test_transaction).collect())
}

enum BlocksReply {
    Range(BlockRange),
    Error,
}

/// Mock chain API with a deterministic hash chain and scripted block replies.
///
/// Unscripted `blocks_from` calls return an empty range, modeling a peer
/// with nothing above the requested height.
pub struct MockChainApi {
    chain_info: Option<ChainInfo>,
    hash_chain: Vec<Hash256>,
    hashes_override: Option<Vec<Hash256>>,
    blocks_replies: Mutex<VecDeque<BlocksReply>>,
    chain_info_calls: AtomicUsize,
    blocks_requests: Mutex<Vec<Height>>,
}

impl MockChainApi {
    pub fn new(height: u64, score: u128) -> MockChainApi {
        MockChainApi {
            chain_info: Some(ChainInfo {
                height: Height(height),
                score: ChainScore(score),
            }),
            hash_chain: hash_chain(height, height, 0),
            hashes_override: None,
            blocks_replies: Mutex::new(VecDeque::new()),
            chain_info_calls: AtomicUsize::new(0),
            blocks_requests: Mutex::new(Vec::new()),
        }
    }

    /// A peer whose every request fails.
    pub fn failing() -> MockChainApi {
        MockChainApi {
            chain_info: None,
            hash_chain: Vec::new(),
            hashes_override: None,
            blocks_replies: Mutex::new(VecDeque::new()),
            chain_info_calls: AtomicUsize::new(0),
            blocks_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_hash_chain(mut self, hash_chain: Vec<Hash256>) -> MockChainApi {
        self.hash_chain = hash_chain;
        self
    }

    pub fn with_hashes_override(mut self, hashes: Vec<Hash256>) -> MockChainApi {
        self.hashes_override = Some(hashes);
        self
    }

    pub fn with_blocks(self, range: BlockRange) -> MockChainApi {
        self.blocks_replies.lock().push_back(BlocksReply::Range(range));
        self
    }

    pub fn with_blocks_error(self) -> MockChainApi {
        self.blocks_replies.lock().push_back(BlocksReply::Error);
        self
    }

    pub fn chain_info_calls(&self) -> usize {
        self.chain_info_calls.load(Ordering::SeqCst)
    }

    pub fn requested_heights(&self) -> Vec<Height> {
        self.blocks_requests.lock().clone()
    }
}

#[async_trait]
impl ChainApi for MockChainApi {
    async fn chain_info(&self) -> Result<ChainInfo, ApiError> {
        self.chain_info_calls.fetch_add(1, Ordering::SeqCst);
        self.chain_info
            .ok_or_else(|| ApiError::ConnectionFailed("mock chain info".into()))
    }

    async fn hashes_from(
        &self,
        height: Height,
        max_hashes: u32,
    ) -> Result<Vec<Hash256>, ApiError> {
        if let Some(hashes) = &self.hashes_override {
            return Ok(hashes.clone());
        }

        let start_index = height.0.saturating_sub(1) as usize;
        Ok(self
            .hash_chain
            .iter()
            .skip(start_index)
            .take(max_hashes as usize)
            .copied()
            .collect())
    }

    async fn blocks_from(
        &self,
        height: Height,
        _options: BlocksFromOptions,
    ) -> Result<BlockRange, ApiError> {
        self.blocks_requests.lock().push(height);
        match self.blocks_replies.lock().pop_front() {
            Some(BlocksReply::Range(range)) => Ok(range),
            Some(BlocksReply::Error) => {
                Err(ApiError::ConnectionFailed("mock blocks request".into()))
            }
            None => Ok(BlockRange::empty()),
        }
    }
}

/// Mock transaction API recording the short hashes of each request.
pub struct MockTransactionApi {
    transactions: Option<TransactionRange>,
    requests: Mutex<Vec<Vec<ShortHash>>>,
}

impl MockTransactionApi {
    pub fn new(transactions: TransactionRange) -> MockTransactionApi {
        MockTransactionApi {
            transactions: Some(transactions),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> MockTransactionApi {
        MockTransactionApi {
            transactions: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ShortHash>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TransactionApi for MockTransactionApi {
    async fn unconfirmed_transactions(
        &self,
        known_short_hashes: Vec<ShortHash>,
    ) -> Result<TransactionRange, ApiError> {
        self.requests.lock().push(known_short_hashes);
        self.transactions
            .clone()
            .ok_or_else(|| ApiError::ConnectionFailed("mock transactions request".into()))
    }
}

pub fn remote_api(
    chain: MockChainApi,
    transactions: MockTransactionApi,
) -> (RemoteApi, Arc<MockChainApi>, Arc<MockTransactionApi>) {
    let chain = Arc::new(chain);
    let transactions = Arc::new(transactions);
    (
        RemoteApi::new(chain.clone(), transactions.clone()),
        chain,
        transactions,
    )
}

/// Records pushed ranges and lets tests drive completion callbacks manually.
///
/// Completion handlers are stored rather than invoked, honoring the consumer
/// contract that completion is reported asynchronously.
pub struct RecordingBlockRangeConsumer {
    next_id: AtomicU64,
    pushed: Mutex<Vec<BlockRange>>,
    handlers: Mutex<VecDeque<(ElementId, CompletionHandler)>>,
}

impl RecordingBlockRangeConsumer {
    pub fn new() -> Arc<RecordingBlockRangeConsumer> {
        Arc::new(RecordingBlockRangeConsumer {
            next_id: AtomicU64::new(1),
            pushed: Mutex::new(Vec::new()),
            handlers: Mutex::new(VecDeque::new()),
        })
    }

    pub fn num_pushed(&self) -> usize {
        self.pushed.lock().len()
    }

    pub fn pushed_ranges(&self) -> Vec<BlockRange> {
        self.pushed.lock().clone()
    }

    /// Report completion for the oldest outstanding element.
    pub fn complete_next(&self, status: CompletionStatus) {
        let entry = self.handlers.lock().pop_front();
        let (id, handler) = entry.expect("no outstanding element to complete");
        handler(id, status);
    }
}

impl CompletionAwareBlockRangeConsumer for RecordingBlockRangeConsumer {
    fn push(&self, range: BlockRange, on_complete: CompletionHandler) -> ElementId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.pushed.lock().push(range);
        self.handlers.lock().push_back((id, on_complete));
        id
    }
}

pub fn transaction_collector() -> (TransactionRangeConsumer, Arc<Mutex<Vec<TransactionRange>>>) {
    let collected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&collected);
    let consumer: TransactionRangeConsumer = Arc::new(move |range| sink.lock().push(range));
    (consumer, collected)
}

pub fn short_hashes_supplier(short_hashes: Vec<ShortHash>) -> ShortHashesSupplier {
    Arc::new(move || short_hashes.clone())
}

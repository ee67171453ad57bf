use std::sync::Arc;

use crate::{ChainApi, TransactionApi};

/// API handles for a single remote peer.
#[derive(Clone)]
pub struct RemoteApi {
    pub chain_api: Arc<dyn ChainApi>,
    pub transaction_api: Arc<dyn TransactionApi>,
}

impl RemoteApi {
    pub fn new(chain_api: Arc<dyn ChainApi>, transaction_api: Arc<dyn TransactionApi>) -> RemoteApi {
        RemoteApi {
            chain_api,
            transaction_api,
        }
    }
}

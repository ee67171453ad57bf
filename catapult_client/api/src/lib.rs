//! API seams between the node core and chain data providers.
//!
//! Both the local chain view and remote peers expose the same [`ChainApi`],
//! so chain comparison can consume the two sides symmetrically. Remote peers
//! additionally expose a [`TransactionApi`] for their unconfirmed
//! transaction cache; [`RemoteApi`] bundles the two handles for one peer.

pub mod chain;
pub mod error;
pub mod remote;
pub mod transaction;

pub use chain::{BlocksFromOptions, ChainApi, ChainInfo};
pub use error::ApiError;
pub use remote::RemoteApi;
pub use transaction::TransactionApi;

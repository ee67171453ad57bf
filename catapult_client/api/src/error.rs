use thiserror::Error;

/// Errors surfaced by chain and transaction API implementations.
///
/// Variants record the origin for logging; the synchronizer treats every
/// peer-sourced error the same way and resolves the round as a failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connection to peer failed ({0})")]
    ConnectionFailed(String),

    #[error("peer returned a malformed response ({0})")]
    MalformedResponse(String),

    #[error("request timed out after {0}ms")]
    RequestTimedOut(u64),
}

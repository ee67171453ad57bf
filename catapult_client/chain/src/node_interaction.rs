/// Outcome of one interaction with a remote node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeInteractionResult {
    /// Useful work was done (blocks were handed downstream).
    Success,
    /// Nothing to do: chains agree, the peer is behind, or the round was
    /// gated off.
    Neutral,
    /// The peer misbehaved or a request failed.
    Failure,
}

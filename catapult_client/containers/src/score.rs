use serde::{Deserialize, Serialize};
use std::fmt;

/// Cumulative chain score. The chain with the higher score wins.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChainScore(pub u128);

impl fmt::Display for ChainScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

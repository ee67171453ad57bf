use serde::{Deserialize, Serialize};
use std::fmt;

/// 256-bit entity hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Truncated transaction hash used to summarize locally known unconfirmed
/// transactions, so a peer can elide transactions the node already holds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShortHash(pub u32);

impl ShortHash {
    /// First four bytes of the full hash, little-endian.
    pub fn from_hash(hash: &Hash256) -> ShortHash {
        ShortHash(u32::from_le_bytes([
            hash.0[0], hash.0[1], hash.0[2], hash.0[3],
        ]))
    }
}

impl fmt::Display for ShortHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Block height on a chain. `Height(0)` denotes "no blocks".
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Height(pub u64);

impl Height {
    /// Height lowered by `delta`, floored at zero.
    pub fn saturating_sub(self, delta: u64) -> Height {
        Height(self.0.saturating_sub(delta))
    }
}

impl Add<u64> for Height {
    type Output = Height;

    fn add(self, rhs: u64) -> Height {
        Height(self.0 + rhs)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub mod block;
pub mod hash;
pub mod height;
pub mod score;
pub mod transaction;

pub use block::{Block, BlockRange};
pub use hash::{Hash256, ShortHash};
pub use height::Height;
pub use score::ChainScore;
pub use transaction::{Transaction, TransactionRange};

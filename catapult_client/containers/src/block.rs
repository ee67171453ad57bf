use crate::{Hash256, Height};
use serde::{Deserialize, Serialize};

/// The slice of a block the synchronizer observes. The full wire format is
/// defined by the serialization layer, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: Height,
    pub previous_block_hash: Hash256,
    pub transactions_hash: Hash256,
    pub difficulty: u64,
    /// Serialized size of the full entity in bytes.
    pub entity_size: u32,
}

/// An ordered run of blocks whose heights increase strictly by one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockRange {
    blocks: Vec<Block>,
}

impl BlockRange {
    /// Wrap an ordered run of blocks.
    ///
    /// # Panics
    ///
    /// Panics when heights are not strictly increasing by one. Constructing a
    /// non-contiguous range is a programmer error.
    pub fn new(blocks: Vec<Block>) -> BlockRange {
        for pair in blocks.windows(2) {
            assert!(
                pair[1].height == pair[0].height + 1,
                "blocks must have contiguous heights ({} follows {})",
                pair[1].height,
                pair[0].height
            );
        }

        BlockRange { blocks }
    }

    /// A range with no blocks.
    pub fn empty() -> BlockRange {
        BlockRange::default()
    }

    /// Merge contiguous, non-overlapping ranges into one, preserving order.
    pub fn merge_ranges(ranges: Vec<BlockRange>) -> BlockRange {
        let mut blocks = Vec::with_capacity(ranges.iter().map(BlockRange::len).sum());
        for range in ranges {
            blocks.extend(range.blocks);
        }

        BlockRange::new(blocks)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of entity sizes across the range, in bytes.
    pub fn total_size(&self) -> u64 {
        self.blocks.iter().map(|block| u64::from(block.entity_size)).sum()
    }

    pub fn first(&self) -> Option<&Block> {
        self.blocks.first()
    }

    pub fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

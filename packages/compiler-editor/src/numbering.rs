use mailblocks_blocks::{walk_block, walk_blocks, Block, BlockLocation, BlockType, Visitor};
use std::collections::HashMap;

/// Display numbers of article blocks ("Article 2"), recomputed on every render.
///
/// Articles are numbered from 1 in document order: a top-level block comes before the
/// blocks nested in its columns, and columns are read left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleNumbering {
    indices: HashMap<String, usize>,
}

impl ArticleNumbering {
    pub fn compute(blocks: &[Block]) -> Self {
        let mut counter = Counter::default();
        walk_blocks(&mut counter, blocks);
        Self {
            indices: counter.indices,
        }
    }

    pub fn index_of(&self, block_id: &str) -> Option<usize> {
        self.indices.get(block_id).copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Default)]
struct Counter {
    indices: HashMap<String, usize>,
}

impl Visitor for Counter {
    fn visit_block(&mut self, block: &Block, _location: &BlockLocation) {
        if block.kind() == BlockType::Article {
            let next = self.indices.len() + 1;
            self.indices.insert(block.id().to_string(), next);
        }
        walk_block(self, block);
    }
}

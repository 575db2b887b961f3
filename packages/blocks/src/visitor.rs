use crate::{Block, ColumnSlot};

/// Where a visited block sits in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLocation<'a> {
    TopLevel {
        index: usize,
    },
    Nested {
        container_id: &'a str,
        column_index: usize,
        index: usize,
    },
}

impl<'a> BlockLocation<'a> {
    pub fn container_id(&self) -> Option<&'a str> {
        match self {
            BlockLocation::TopLevel { .. } => None,
            BlockLocation::Nested { container_id, .. } => Some(container_id),
        }
    }

    pub fn column_index(&self) -> Option<usize> {
        match self {
            BlockLocation::TopLevel { .. } => None,
            BlockLocation::Nested { column_index, .. } => Some(*column_index),
        }
    }
}

/// Visitor pattern for traversing a block tree
///
/// The default implementations walk the whole tree in document order: a block is visited
/// before the columns it contains, and columns are visited left to right.
pub trait Visitor: Sized {
    fn visit_block(&mut self, block: &Block, _location: &BlockLocation) {
        walk_block(self, block);
    }

    fn visit_column(&mut self, container: &Block, column_index: usize, slot: &ColumnSlot) {
        walk_column(self, container, column_index, slot);
    }
}

pub fn walk_blocks<V: Visitor>(visitor: &mut V, blocks: &[Block]) {
    for (index, block) in blocks.iter().enumerate() {
        visitor.visit_block(block, &BlockLocation::TopLevel { index });
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) {
    if let Some(columns) = block.columns() {
        for (column_index, slot) in columns.columns().iter().enumerate() {
            visitor.visit_column(block, column_index, slot);
        }
    }
}

pub fn walk_column<V: Visitor>(
    visitor: &mut V,
    container: &Block,
    column_index: usize,
    slot: &ColumnSlot,
) {
    for (index, nested) in slot.blocks().iter().enumerate() {
        visitor.visit_block(
            nested,
            &BlockLocation::Nested {
                container_id: container.id(),
                column_index,
                index,
            },
        );
    }
}

//! # Builder mutations
//!
//! Every gesture the host UI captures becomes one [`Mutation`]. A mutation is validated
//! against the current document before anything changes, so a rejected mutation leaves the
//! tree and the selection exactly as they were.
//!
//! ## Mutation Semantics
//!
//! ### Stale ids
//! - A mutation naming a block that no longer exists is a no-op, reported as unchanged
//! - Naming an existing block of the wrong kind (a leaf where a container is expected) is
//!   an error
//!
//! ### Moves
//! - Target indices are positions in the list before the moved block is taken out
//! - Dropping a block onto itself or the slot right after it changes nothing
//! - Containers never enter a column
//!
//! ### Articles
//! - A merge replaces the selected blocks with one article at the first selected position
//! - Breaking an article replaces it in place with image, title and description blocks
//!
//! ### Selection
//! - Creating, duplicating, moving, merging or breaking selects the result
//! - Deleting clears the selection

use crate::Document;
use mailblocks_blocks::{
    break_article, move_within, ArticleConfig, Block, BlockConfig, BlockError, BlockType,
    ColumnsConfig, ConfigPatch, NestedRef, RegistryError, Selection,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic operations on the block tree and selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Click on a top-level block; `additive` toggles it in the multi-selection
    SelectTop {
        id: String,
        #[serde(default)]
        additive: bool,
    },

    SelectContainer {
        id: String,
    },

    SelectColumn {
        container_id: String,
        column_index: usize,
    },

    /// Click on a nested block; `additive` toggles it in the nested multi-selection
    SelectNested {
        target: NestedRef,
        #[serde(default)]
        additive: bool,
    },

    DeselectAll,

    /// Create a block from the registry and insert it at the top level
    InsertTop {
        block_type: String,
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        overrides: Option<ConfigPatch>,
    },

    UpdateBlock {
        id: String,
        patch: ConfigPatch,
    },

    DuplicateTop {
        id: String,
    },

    DeleteTop {
        id: String,
    },

    /// Move a top-level block in front of the block currently at `to` (`to == len` appends)
    MoveTop {
        id: String,
        to: usize,
    },

    MoveTopUp {
        id: String,
    },

    MoveTopDown {
        id: String,
    },

    BreakArticle {
        id: String,
    },

    /// Merge the selected top-level blocks into one article
    MergeSelectionIntoArticle,

    UpdateColumn {
        container_id: String,
        column_index: usize,
        patch: ConfigPatch,
    },

    /// Create a block from the registry inside a column
    AddToColumn {
        container_id: String,
        column_index: usize,
        block_type: String,
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        overrides: Option<ConfigPatch>,
    },

    /// Move a top-level leaf block into a column
    MoveIntoColumn {
        id: String,
        container_id: String,
        column_index: usize,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Move a nested block to a position in any column
    MoveNested {
        target: NestedRef,
        to_container_id: String,
        to_column_index: usize,
        index: usize,
    },

    /// Move a nested block out of its column to the top level
    MoveOutOfColumn {
        target: NestedRef,
        #[serde(default)]
        index: Option<usize>,
    },

    UpdateNested {
        target: NestedRef,
        patch: ConfigPatch,
    },

    DuplicateNested {
        target: NestedRef,
    },

    DeleteNested {
        target: NestedRef,
    },

    BreakNestedArticle {
        target: NestedRef,
    },

    /// Merge the selected nested blocks, all from one column, into one article
    MergeNestedSelectionIntoArticle,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Nothing is selected")]
    EmptySelection,

    #[error("Selected blocks must all be in the same column")]
    SelectionSpansColumns,

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl Mutation {
    /// Prompt for the confirmation gate, for mutations that destroy blocks
    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            Mutation::DeleteTop { .. } | Mutation::DeleteNested { .. } => Some("Delete this block?"),
            _ => None,
        }
    }

    /// Apply to the document. Returns whether anything changed.
    pub(crate) fn apply(&self, doc: &mut Document) -> Result<bool, MutationError> {
        self.validate(doc)?;

        let Document {
            blocks,
            selection,
            ids,
            registry,
            ..
        } = doc;

        match self {
            Mutation::SelectTop { id, additive } => {
                if position(blocks, id).is_none() {
                    return Ok(false);
                }
                selection.select_top(id, *additive);
                Ok(true)
            }

            Mutation::SelectContainer { id } => {
                if container(blocks, id)?.is_none() {
                    return Ok(false);
                }
                selection.select_container(id);
                Ok(true)
            }

            Mutation::SelectColumn {
                container_id,
                column_index,
            } => {
                let Some(columns) = container(blocks, container_id)? else {
                    return Ok(false);
                };
                columns.column(*column_index)?;
                selection.select_column(container_id, *column_index);
                Ok(true)
            }

            Mutation::SelectNested { target, additive } => {
                let Some(columns) = container(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                if columns.nested(target.column_index, &target.block_id)?.is_none() {
                    return Ok(false);
                }
                selection.select_nested(target.clone(), *additive);
                Ok(true)
            }

            Mutation::DeselectAll => {
                let changed = !selection.is_none();
                selection.deselect_all();
                Ok(changed)
            }

            Mutation::InsertTop {
                block_type,
                index,
                overrides,
            } => {
                let block = registry.create(block_type, overrides.as_ref(), ids)?;
                let at = index.unwrap_or(blocks.len()).min(blocks.len());
                select_block(selection, &block);
                blocks.insert(at, block);
                Ok(true)
            }

            Mutation::UpdateBlock { id, patch } => {
                match blocks.iter_mut().find(|b| b.id() == id) {
                    Some(block) => {
                        block.update_config(patch)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }

            Mutation::DuplicateTop { id } => {
                let Some(index) = position(blocks, id) else {
                    return Ok(false);
                };
                let copy = blocks[index].duplicate(ids);
                select_block(selection, &copy);
                blocks.insert(index + 1, copy);
                Ok(true)
            }

            Mutation::DeleteTop { id } => {
                let Some(index) = position(blocks, id) else {
                    return Ok(false);
                };
                blocks.remove(index);
                selection.deselect_all();
                Ok(true)
            }

            Mutation::MoveTop { id, to } => {
                let Some(from) = position(blocks, id) else {
                    return Ok(false);
                };
                let moved = move_within(blocks, from, *to);
                if moved {
                    selection.select_top(id, false);
                }
                Ok(moved)
            }

            Mutation::MoveTopUp { id } => match position(blocks, id) {
                Some(index) if index > 0 => {
                    blocks.swap(index, index - 1);
                    Ok(true)
                }
                _ => Ok(false),
            },

            Mutation::MoveTopDown { id } => match position(blocks, id) {
                Some(index) if index + 1 < blocks.len() => {
                    blocks.swap(index, index + 1);
                    Ok(true)
                }
                _ => Ok(false),
            },

            Mutation::BreakArticle { id } => {
                let Some(index) = position(blocks, id) else {
                    return Ok(false);
                };
                let parts = break_article(&blocks[index], ids)?;
                selection.select_top(parts[0].id(), false);
                blocks.splice(index..=index, parts);
                Ok(true)
            }

            Mutation::MergeSelectionIntoArticle => {
                let selected = selected_top_ids(selection);
                let sources: Vec<&Block> = selected
                    .iter()
                    .filter_map(|id| blocks.iter().find(|b| b.id() == id))
                    .collect();
                let Some(first) = selected.iter().filter_map(|id| position(blocks, id)).min()
                else {
                    return Ok(false);
                };

                let article = Block::new(
                    ids.new_id(),
                    BlockConfig::Article(ArticleConfig::from_blocks(&sources)),
                );
                tracing::info!(sources = sources.len(), id = article.id(), "merged blocks into article");

                blocks.retain(|b| !selected.iter().any(|id| id == b.id()));
                selection.select_top(article.id(), false);
                blocks.insert(first.min(blocks.len()), article);
                Ok(true)
            }

            Mutation::UpdateColumn {
                container_id,
                column_index,
                patch,
            } => {
                let Some(columns) = container_mut(blocks, container_id)? else {
                    return Ok(false);
                };
                columns.update_column(*column_index, patch)?;
                Ok(true)
            }

            Mutation::AddToColumn {
                container_id,
                column_index,
                block_type,
                index,
                overrides,
            } => {
                let Some(columns) = container_mut(blocks, container_id)? else {
                    return Ok(false);
                };
                let block = registry.create(block_type, overrides.as_ref(), ids)?;
                let block_id = block.id().to_string();
                columns.add_to_column(*column_index, block, *index)?;
                selection.select_nested(NestedRef::new(container_id, *column_index, &block_id), false);
                Ok(true)
            }

            Mutation::MoveIntoColumn {
                id,
                container_id,
                column_index,
                index,
            } => {
                let Some(from) = position(blocks, id) else {
                    return Ok(false);
                };
                if container(blocks, container_id)?.is_none() {
                    return Ok(false);
                }

                let block = blocks.remove(from);
                let Some(columns) = container_mut(blocks, container_id)? else {
                    return Ok(false);
                };
                columns.add_to_column(*column_index, block, *index)?;
                selection.select_nested(NestedRef::new(container_id, *column_index, id), false);
                Ok(true)
            }

            Mutation::MoveNested {
                target,
                to_container_id,
                to_column_index,
                index,
            } => {
                let same_column = target.container_id == *to_container_id
                    && target.column_index == *to_column_index;

                if same_column {
                    let Some(columns) = container_mut(blocks, to_container_id)? else {
                        return Ok(false);
                    };
                    let moved =
                        columns.move_in_column(target.column_index, &target.block_id, *index)?;
                    if moved {
                        selection.select_nested(target.clone(), false);
                    }
                    return Ok(moved);
                }

                if container(blocks, to_container_id)?.is_none() {
                    return Ok(false);
                }
                let Some(source) = container_mut(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                let Some(block) = source.remove_from_column(target.column_index, &target.block_id)?
                else {
                    return Ok(false);
                };
                let Some(destination) = container_mut(blocks, to_container_id)? else {
                    return Ok(false);
                };
                destination.add_to_column(*to_column_index, block, Some(*index))?;
                selection.select_nested(
                    NestedRef::new(to_container_id, *to_column_index, &target.block_id),
                    false,
                );
                Ok(true)
            }

            Mutation::MoveOutOfColumn { target, index } => {
                let Some(columns) = container_mut(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                let Some(block) = columns.remove_from_column(target.column_index, &target.block_id)?
                else {
                    return Ok(false);
                };
                let at = index.unwrap_or(blocks.len()).min(blocks.len());
                select_block(selection, &block);
                blocks.insert(at, block);
                Ok(true)
            }

            Mutation::UpdateNested { target, patch } => {
                let Some(columns) = container_mut(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                match columns.nested_mut(target.column_index, &target.block_id)? {
                    Some(block) => {
                        block.update_config(patch)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }

            Mutation::DuplicateNested { target } => {
                let Some(columns) = container_mut(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                let column = columns.column(target.column_index)?;
                let Some(index) = column.position(&target.block_id) else {
                    return Ok(false);
                };
                let copy = column.blocks()[index].duplicate(ids);
                let copy_id = copy.id().to_string();
                columns.add_to_column(target.column_index, copy, Some(index + 1))?;
                selection.select_nested(
                    NestedRef::new(&target.container_id, target.column_index, &copy_id),
                    false,
                );
                Ok(true)
            }

            Mutation::DeleteNested { target } => {
                let Some(columns) = container_mut(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                let removed = columns.remove_from_column(target.column_index, &target.block_id)?;
                if removed.is_some() {
                    selection.deselect_all();
                }
                Ok(removed.is_some())
            }

            Mutation::BreakNestedArticle { target } => {
                let Some(columns) = container_mut(blocks, &target.container_id)? else {
                    return Ok(false);
                };
                let Some(article) = columns.nested(target.column_index, &target.block_id)? else {
                    return Ok(false);
                };
                let parts = break_article(article, ids)?;
                let image_id = parts[0].id().to_string();
                columns.replace_in_column(target.column_index, &target.block_id, parts.into())?;
                selection.select_nested(
                    NestedRef::new(&target.container_id, target.column_index, &image_id),
                    false,
                );
                Ok(true)
            }

            Mutation::MergeNestedSelectionIntoArticle => {
                let entries = selected_nested(selection);
                let Some(first_entry) = entries.first().cloned() else {
                    return Ok(false);
                };
                let Some(columns) = container_mut(blocks, &first_entry.container_id)? else {
                    return Ok(false);
                };

                let selected: Vec<String> = entries.into_iter().map(|e| e.block_id).collect();
                let (first, taken) = columns.take_from_column(first_entry.column_index, &selected)?;
                let Some(first) = first else {
                    return Ok(false);
                };

                let sources: Vec<&Block> = taken.iter().collect();
                let article = Block::new(
                    ids.new_id(),
                    BlockConfig::Article(ArticleConfig::from_blocks(&sources)),
                );
                let article_id = article.id().to_string();
                tracing::info!(sources = sources.len(), id = %article_id, "merged nested blocks into article");

                columns.add_to_column(first_entry.column_index, article, Some(first))?;
                selection.select_nested(
                    NestedRef::new(&first_entry.container_id, first_entry.column_index, &article_id),
                    false,
                );
                Ok(true)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        let blocks = &doc.blocks;

        match self {
            Mutation::InsertTop { block_type, .. } => {
                if !doc.registry.has(block_type) {
                    return Err(RegistryError::UnknownType(block_type.clone()).into());
                }
                Ok(())
            }

            Mutation::AddToColumn {
                container_id,
                column_index,
                block_type,
                ..
            } => {
                let kind = doc
                    .registry
                    .metadata(block_type)
                    .map(|definition| definition.kind)
                    .ok_or_else(|| RegistryError::UnknownType(block_type.clone()))?;
                if kind.is_container() {
                    return Err(BlockError::NestedContainer.into());
                }
                check_column(blocks, container_id, *column_index)
            }

            Mutation::MoveIntoColumn {
                id,
                container_id,
                column_index,
                ..
            } => {
                if let Some(block) = blocks.iter().find(|b| b.id() == id) {
                    if block.kind().is_container() {
                        return Err(BlockError::NestedContainer.into());
                    }
                }
                check_column(blocks, container_id, *column_index)
            }

            Mutation::MoveNested {
                target,
                to_container_id,
                to_column_index,
                ..
            } => {
                check_column(blocks, &target.container_id, target.column_index)?;
                check_column(blocks, to_container_id, *to_column_index)
            }

            Mutation::MoveOutOfColumn { target, .. }
            | Mutation::UpdateNested { target, .. }
            | Mutation::DuplicateNested { target }
            | Mutation::DeleteNested { target }
            | Mutation::BreakNestedArticle { target } => {
                check_column(blocks, &target.container_id, target.column_index)
            }

            Mutation::UpdateColumn {
                container_id,
                column_index,
                ..
            } => check_column(blocks, container_id, *column_index),

            Mutation::BreakArticle { id } => match blocks.iter().find(|b| b.id() == id) {
                Some(block) if block.kind() != BlockType::Article => {
                    Err(BlockError::NotAnArticle(id.clone()).into())
                }
                _ => Ok(()),
            },

            Mutation::MergeSelectionIntoArticle => {
                let selected = selected_top_ids(&doc.selection);
                if selected.iter().all(|id| position(blocks, id).is_none()) {
                    return Err(MutationError::EmptySelection);
                }
                Ok(())
            }

            Mutation::MergeNestedSelectionIntoArticle => {
                let entries = selected_nested(&doc.selection);
                let first = entries.first().ok_or(MutationError::EmptySelection)?;
                if !entries.iter().all(|entry| entry.same_column(first)) {
                    return Err(MutationError::SelectionSpansColumns);
                }
                check_column(blocks, &first.container_id, first.column_index)
            }

            Mutation::SelectTop { .. }
            | Mutation::SelectContainer { .. }
            | Mutation::SelectColumn { .. }
            | Mutation::SelectNested { .. }
            | Mutation::DeselectAll
            | Mutation::UpdateBlock { .. }
            | Mutation::DuplicateTop { .. }
            | Mutation::DeleteTop { .. }
            | Mutation::MoveTop { .. }
            | Mutation::MoveTopUp { .. }
            | Mutation::MoveTopDown { .. } => Ok(()),
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Whether the tree or selection changed; stale ids and declined deletes report `false`
    pub changed: bool,
}

fn position(blocks: &[Block], id: &str) -> Option<usize> {
    blocks.iter().position(|b| b.id() == id)
}

/// A top-level container by id; `Ok(None)` when no block has that id
fn container<'a>(blocks: &'a [Block], id: &str) -> Result<Option<&'a ColumnsConfig>, MutationError> {
    match blocks.iter().find(|b| b.id() == id) {
        Some(block) => match block.columns() {
            Some(columns) => Ok(Some(columns)),
            None => Err(BlockError::NotAContainer(id.to_string()).into()),
        },
        None => Ok(None),
    }
}

fn container_mut<'a>(
    blocks: &'a mut [Block],
    id: &str,
) -> Result<Option<&'a mut ColumnsConfig>, MutationError> {
    match blocks.iter_mut().find(|b| b.id() == id) {
        Some(block) => Ok(Some(block.expect_columns_mut()?)),
        None => Ok(None),
    }
}

/// Column exists when its container does
fn check_column(blocks: &[Block], container_id: &str, column: usize) -> Result<(), MutationError> {
    if let Some(columns) = container(blocks, container_id)? {
        columns.column(column)?;
    }
    Ok(())
}

fn select_block(selection: &mut Selection, block: &Block) {
    if block.kind().is_container() {
        selection.select_container(block.id());
    } else {
        selection.select_top(block.id(), false);
    }
}

fn selected_top_ids(selection: &Selection) -> Vec<String> {
    match selection {
        Selection::MultiBlock { ids } => ids.clone(),
        Selection::Block { id } => vec![id.clone()],
        _ => Vec::new(),
    }
}

fn selected_nested(selection: &Selection) -> Vec<NestedRef> {
    match selection {
        Selection::MultiNested { entries } => entries.clone(),
        Selection::Nested(entry) => vec![entry.clone()],
        _ => Vec::new(),
    }
}

//! # Column containers
//!
//! One container type covers both the two- and three-column blocks: the slot count is fixed
//! when the config is created and no operation here can add or remove a slot. Slots hold
//! leaf or article blocks only; a container is never accepted into a slot.

use crate::config::{Align, BorderStyle, VerticalAlign};
use crate::patch::apply_patch;
use crate::{Block, BlockError, ConfigPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One column of a container block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnSlot {
    blocks: Vec<Block>,
    pub vertical_align: VerticalAlign,
    pub horizontal_align: Align,
    pub padding: String,
    pub background_color: String,
    pub border_width: String,
    pub border_color: String,
    pub border_style: BorderStyle,
    pub border_radius: String,
}

impl Default for ColumnSlot {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            vertical_align: VerticalAlign::Top,
            horizontal_align: Align::Left,
            padding: "16px".to_string(),
            background_color: "transparent".to_string(),
            border_width: "0px".to_string(),
            border_color: "#e5e7eb".to_string(),
            border_style: BorderStyle::Solid,
            border_radius: "0px".to_string(),
        }
    }
}

impl ColumnSlot {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == block_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsConfig {
    pub gap: String,
    pub padding: String,
    pub background_color: String,
    pub border_width: String,
    pub border_color: String,
    pub border_style: BorderStyle,
    pub border_radius: String,
    columns: Vec<ColumnSlot>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self::with_slots(2)
    }
}

impl ColumnsConfig {
    pub fn with_slots(count: usize) -> Self {
        Self {
            gap: "16px".to_string(),
            padding: "16px".to_string(),
            background_color: "transparent".to_string(),
            border_width: "0px".to_string(),
            border_color: "#e5e7eb".to_string(),
            border_style: BorderStyle::Solid,
            border_radius: "0px".to_string(),
            columns: (0..count).map(|_| ColumnSlot::default()).collect(),
        }
    }

    /// Deserialize a container config that must have exactly `expected` slots.
    ///
    /// A missing `columns` array gets `expected` default slots.
    pub(crate) fn from_value(
        mut value: Value,
        kind: &str,
        expected: usize,
    ) -> Result<Self, BlockError> {
        if let Some(object) = value.as_object_mut() {
            if !object.contains_key("columns") {
                let slots = serde_json::to_value(Self::with_slots(expected).columns)?;
                object.insert("columns".to_string(), slots);
            }
        }

        let config: ColumnsConfig = serde_json::from_value(value)?;
        if config.columns.len() != expected {
            return Err(BlockError::SlotCountMismatch {
                kind: kind.to_string(),
                expected,
                found: config.columns.len(),
            });
        }
        if config.all_blocks().any(|b| b.kind().is_container()) {
            return Err(BlockError::NestedContainer);
        }

        Ok(config)
    }

    pub fn slot_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Result<&ColumnSlot, BlockError> {
        let count = self.columns.len();
        self.columns
            .get(index)
            .ok_or(BlockError::InvalidColumnIndex { index, count })
    }

    fn column_mut(&mut self, index: usize) -> Result<&mut ColumnSlot, BlockError> {
        let count = self.columns.len();
        self.columns
            .get_mut(index)
            .ok_or(BlockError::InvalidColumnIndex { index, count })
    }

    /// Every nested block, column by column
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.columns.iter().flat_map(|c| c.blocks.iter())
    }

    pub(crate) fn all_blocks_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.columns.iter_mut().flat_map(|c| c.blocks.iter_mut())
    }

    /// Locate a nested block: `(column, position)`
    pub fn find_nested(&self, block_id: &str) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column, slot)| slot.position(block_id).map(|pos| (column, pos)))
    }

    pub fn nested(&self, column: usize, block_id: &str) -> Result<Option<&Block>, BlockError> {
        Ok(self.column(column)?.blocks.iter().find(|b| b.id() == block_id))
    }

    pub fn nested_mut(
        &mut self,
        column: usize,
        block_id: &str,
    ) -> Result<Option<&mut Block>, BlockError> {
        Ok(self
            .column_mut(column)?
            .blocks
            .iter_mut()
            .find(|b| b.id() == block_id))
    }

    /// Insert `block` into a column at `at` (end of the column when `None` or past the end).
    ///
    /// Returns the position the block landed at.
    pub fn add_to_column(
        &mut self,
        column: usize,
        block: Block,
        at: Option<usize>,
    ) -> Result<usize, BlockError> {
        if block.kind().is_container() {
            return Err(BlockError::NestedContainer);
        }
        let slot = self.column_mut(column)?;
        let index = at.unwrap_or(slot.blocks.len()).min(slot.blocks.len());
        slot.blocks.insert(index, block);
        Ok(index)
    }

    /// Remove a block from a column; `Ok(None)` when it is not there
    pub fn remove_from_column(
        &mut self,
        column: usize,
        block_id: &str,
    ) -> Result<Option<Block>, BlockError> {
        let slot = self.column_mut(column)?;
        Ok(slot.position(block_id).map(|pos| slot.blocks.remove(pos)))
    }

    /// Remove every block whose id is in `ids`, keeping column order.
    ///
    /// Returns the position of the first removed block and the removed blocks.
    pub fn take_from_column(
        &mut self,
        column: usize,
        ids: &[String],
    ) -> Result<(Option<usize>, Vec<Block>), BlockError> {
        let slot = self.column_mut(column)?;
        let first = slot.blocks.iter().position(|b| ids.iter().any(|id| id == b.id()));

        let (taken, kept): (Vec<Block>, Vec<Block>) = std::mem::take(&mut slot.blocks)
            .into_iter()
            .partition(|b| ids.iter().any(|id| id == b.id()));
        slot.blocks = kept;

        Ok((first, taken))
    }

    /// Replace one nested block with `replacements`, in place.
    ///
    /// Returns `Ok(false)` when the block is not in the column.
    pub fn replace_in_column(
        &mut self,
        column: usize,
        block_id: &str,
        replacements: Vec<Block>,
    ) -> Result<bool, BlockError> {
        if replacements.iter().any(|b| b.kind().is_container()) {
            return Err(BlockError::NestedContainer);
        }
        let slot = self.column_mut(column)?;
        match slot.position(block_id) {
            Some(pos) => {
                slot.blocks.splice(pos..=pos, replacements);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move a block within one column so it lands before what is currently at `to`
    pub fn move_in_column(
        &mut self,
        column: usize,
        block_id: &str,
        to: usize,
    ) -> Result<bool, BlockError> {
        let slot = self.column_mut(column)?;
        match slot.position(block_id) {
            Some(from) => Ok(crate::move_within(&mut slot.blocks, from, to)),
            None => Ok(false),
        }
    }

    /// Patch one slot's styling. The slot's nested blocks cannot be patched this way.
    pub fn update_column(&mut self, column: usize, patch: &ConfigPatch) -> Result<(), BlockError> {
        if let Some(key) = patch
            .keys()
            .find(|k| *k == "blocks" || k.starts_with("blocks."))
        {
            return Err(BlockError::ProtectedField(key.clone()));
        }

        let slot = self.column_mut(column)?;
        let mut value = serde_json::to_value(&*slot)?;
        for key in patch.keys() {
            let root = key.split('.').next().unwrap_or(key);
            if value.get(root).is_none() {
                return Err(BlockError::UnknownField {
                    kind: "column".to_string(),
                    field: key.clone(),
                });
            }
        }
        apply_patch(&mut value, patch)?;

        let mut updated: ColumnSlot = serde_json::from_value(value)?;
        updated.blocks = std::mem::take(&mut slot.blocks);
        *slot = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockConfig, TextConfig};
    use serde_json::json;

    fn text(id: &str) -> Block {
        Block::new(id, BlockConfig::Text(TextConfig::default()))
    }

    fn ids(slot: &ColumnSlot) -> Vec<&str> {
        slot.blocks().iter().map(|b| b.id()).collect()
    }

    #[test]
    fn test_add_defaults_to_end() {
        let mut config = ColumnsConfig::with_slots(2);
        config.add_to_column(0, text("a"), None).unwrap();
        config.add_to_column(0, text("b"), None).unwrap();
        config.add_to_column(0, text("c"), Some(0)).unwrap();

        assert_eq!(ids(&config.columns()[0]), vec!["c", "a", "b"]);
        assert_eq!(config.slot_count(), 2);
    }

    #[test]
    fn test_invalid_column_index() {
        let mut config = ColumnsConfig::with_slots(3);
        let err = config.add_to_column(3, text("a"), None).unwrap_err();
        assert_eq!(err, BlockError::InvalidColumnIndex { index: 3, count: 3 });
        assert!(config.all_blocks().next().is_none());
    }

    #[test]
    fn test_rejects_nested_container() {
        let mut config = ColumnsConfig::with_slots(2);
        let inner = Block::new("inner", BlockConfig::Columns(ColumnsConfig::with_slots(2)));
        assert_eq!(
            config.add_to_column(0, inner, None),
            Err(BlockError::NestedContainer)
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut config = ColumnsConfig::with_slots(2);
        config.add_to_column(1, text("a"), None).unwrap();
        assert_eq!(config.remove_from_column(1, "zzz").unwrap(), None);
        assert_eq!(config.columns()[1].blocks().len(), 1);
    }

    #[test]
    fn test_take_keeps_order() {
        let mut config = ColumnsConfig::with_slots(2);
        for id in ["a", "b", "c", "d"] {
            config.add_to_column(0, text(id), None).unwrap();
        }
        let (first, taken) = config
            .take_from_column(0, &["d".to_string(), "b".to_string()])
            .unwrap();

        assert_eq!(first, Some(1));
        assert_eq!(taken.iter().map(|b| b.id()).collect::<Vec<_>>(), vec!["b", "d"]);
        assert_eq!(ids(&config.columns()[0]), vec!["a", "c"]);
    }

    #[test]
    fn test_update_column_styling() {
        let mut config = ColumnsConfig::with_slots(2);
        config.add_to_column(0, text("a"), None).unwrap();

        let patch = json!({ "verticalAlign": "middle", "padding": "4px" });
        config.update_column(0, patch.as_object().unwrap()).unwrap();

        let slot = &config.columns()[0];
        assert_eq!(slot.vertical_align, VerticalAlign::Middle);
        assert_eq!(slot.padding, "4px");
        assert_eq!(ids(slot), vec!["a"]);
    }

    #[test]
    fn test_update_column_cannot_touch_blocks() {
        let mut config = ColumnsConfig::with_slots(2);
        let patch = json!({ "blocks": [] });
        assert_eq!(
            config.update_column(0, patch.as_object().unwrap()),
            Err(BlockError::ProtectedField("blocks".to_string()))
        );
    }

    #[test]
    fn test_from_value_fills_missing_slots() {
        let config = ColumnsConfig::from_value(json!({ "gap": "8px" }), "columns3", 3).unwrap();
        assert_eq!(config.slot_count(), 3);
        assert_eq!(config.gap, "8px");
    }

    #[test]
    fn test_from_value_rejects_wrong_slot_count() {
        let value = json!({ "columns": [{}, {}, {}] });
        let err = ColumnsConfig::from_value(value, "columns", 2).unwrap_err();
        assert_eq!(
            err,
            BlockError::SlotCountMismatch {
                kind: "columns".to_string(),
                expected: 2,
                found: 3
            }
        );
    }
}

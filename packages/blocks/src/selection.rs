//! # Selection model
//!
//! The editor selects exactly one thing at a time: nothing, a block, a container, a column,
//! a nested block, or a multi-selection. Top-level and nested multi-selections are separate
//! variants, so starting one always clears the other.

use serde::{Deserialize, Serialize};

/// A block inside a container column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedRef {
    pub container_id: String,
    pub column_index: usize,
    pub block_id: String,
}

impl NestedRef {
    pub fn new(container_id: &str, column_index: usize, block_id: &str) -> Self {
        Self {
            container_id: container_id.to_string(),
            column_index,
            block_id: block_id.to_string(),
        }
    }

    pub fn same_column(&self, other: &NestedRef) -> bool {
        self.container_id == other.container_id && self.column_index == other.column_index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    None,
    Block {
        id: String,
    },
    Container {
        id: String,
    },
    Column {
        #[serde(rename = "containerId")]
        container_id: String,
        #[serde(rename = "columnIndex")]
        column_index: usize,
    },
    Nested(NestedRef),
    MultiBlock {
        ids: Vec<String>,
    },
    MultiNested {
        entries: Vec<NestedRef>,
    },
}

impl Selection {
    /// Click on a top-level block; `additive` toggles it in the top-level multi-selection
    pub fn select_top(&mut self, id: &str, additive: bool) {
        if !additive {
            *self = Selection::Block { id: id.to_string() };
            return;
        }

        let mut ids = match std::mem::take(self) {
            Selection::MultiBlock { ids } => ids,
            _ => Vec::new(),
        };
        match ids.iter().position(|existing| existing == id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(id.to_string()),
        }
        *self = if ids.is_empty() {
            Selection::None
        } else {
            Selection::MultiBlock { ids }
        };
    }

    pub fn select_container(&mut self, id: &str) {
        *self = Selection::Container { id: id.to_string() };
    }

    pub fn select_column(&mut self, container_id: &str, column_index: usize) {
        *self = Selection::Column {
            container_id: container_id.to_string(),
            column_index,
        };
    }

    /// Click on a nested block; `additive` toggles it in the nested multi-selection
    pub fn select_nested(&mut self, entry: NestedRef, additive: bool) {
        if !additive {
            *self = Selection::Nested(entry);
            return;
        }

        let mut entries = match std::mem::take(self) {
            Selection::MultiNested { entries } => entries,
            _ => Vec::new(),
        };
        match entries.iter().position(|existing| *existing == entry) {
            Some(pos) => {
                entries.remove(pos);
            }
            None => entries.push(entry),
        }
        *self = if entries.is_empty() {
            Selection::None
        } else {
            Selection::MultiNested { entries }
        };
    }

    pub fn deselect_all(&mut self) {
        *self = Selection::None;
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// Whether a top-level block is selected, alone or as part of a multi-selection
    pub fn is_block_selected(&self, id: &str) -> bool {
        match self {
            Selection::Block { id: selected } | Selection::Container { id: selected } => {
                selected == id
            }
            Selection::MultiBlock { ids } => ids.iter().any(|s| s == id),
            _ => false,
        }
    }

    pub fn is_in_multi(&self, id: &str) -> bool {
        match self {
            Selection::MultiBlock { ids } => ids.iter().any(|s| s == id),
            Selection::MultiNested { entries } => entries.iter().any(|e| e.block_id == id),
            _ => false,
        }
    }

    pub fn is_column_selected(&self, container_id: &str, column_index: usize) -> bool {
        matches!(
            self,
            Selection::Column { container_id: c, column_index: i }
                if c == container_id && *i == column_index
        )
    }

    pub fn is_nested_selected(&self, block_id: &str) -> bool {
        match self {
            Selection::Nested(entry) => entry.block_id == block_id,
            Selection::MultiNested { entries } => entries.iter().any(|e| e.block_id == block_id),
            _ => false,
        }
    }

    /// Drop every reference to a block that no longer exists
    pub fn forget(&mut self, id: &str) {
        let cleared = match self {
            Selection::Block { id: s } | Selection::Container { id: s } => s == id,
            Selection::Column { container_id, .. } => container_id == id,
            Selection::Nested(entry) => entry.block_id == id || entry.container_id == id,
            Selection::MultiBlock { ids } => {
                ids.retain(|s| s != id);
                ids.is_empty()
            }
            Selection::MultiNested { entries } => {
                entries.retain(|e| e.block_id != id && e.container_id != id);
                entries.is_empty()
            }
            Selection::None => false,
        };
        if cleared {
            *self = Selection::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_click_replaces_selection() {
        let mut selection = Selection::default();
        selection.select_top("a", true);
        selection.select_top("b", false);
        assert_eq!(selection, Selection::Block { id: "b".to_string() });
    }

    #[test]
    fn test_additive_click_toggles() {
        let mut selection = Selection::default();
        selection.select_top("a", true);
        selection.select_top("b", true);
        selection.select_top("a", true);
        assert_eq!(
            selection,
            Selection::MultiBlock {
                ids: vec!["b".to_string()]
            }
        );

        selection.select_top("b", true);
        assert!(selection.is_none());
    }

    #[test]
    fn test_nested_multi_clears_top_multi() {
        let mut selection = Selection::default();
        selection.select_top("a", true);
        selection.select_nested(NestedRef::new("c", 0, "n1"), true);

        assert!(!selection.is_in_multi("a"));
        assert!(selection.is_nested_selected("n1"));

        selection.select_top("a", true);
        assert!(!selection.is_nested_selected("n1"));
        assert!(selection.is_in_multi("a"));
    }

    #[test]
    fn test_forget_deleted_block() {
        let mut selection = Selection::default();
        selection.select_nested(NestedRef::new("c", 1, "n1"), false);
        selection.forget("c");
        assert!(selection.is_none());

        selection.select_top("a", true);
        selection.select_top("b", true);
        selection.forget("a");
        assert!(selection.is_in_multi("b"));
    }

    #[test]
    fn test_serialized_tag() {
        let mut selection = Selection::default();
        selection.select_column("c", 2);
        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "column", "containerId": "c", "columnIndex": 2 })
        );
    }
}

//! # Block registry
//!
//! Maps type tags to palette metadata and constructs blocks from their defaults. The host
//! builds one registry at startup with [`BlockRegistry::with_builtins`]; there is no global
//! instance.

use crate::{Block, BlockError, BlockType, ConfigPatch, IdGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Block type \"{0}\" is not registered")]
    UnknownType(String),

    #[error("Block type \"{0}\" is already registered")]
    AlreadyRegistered(String),

    #[error("Duplicate block id \"{0}\"")]
    DuplicateId(String),

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error("Invalid document JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Json(e.to_string())
    }
}

/// Palette group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Content,
    Media,
    Layout,
    Advanced,
}

/// Palette metadata for one block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    #[serde(rename = "type")]
    pub kind: BlockType,
    pub label: String,
    pub icon: String,
    pub category: Category,
}

impl BlockDefinition {
    pub fn new(kind: BlockType, label: &str, icon: &str, category: Category) -> Self {
        Self {
            kind,
            label: label.to_string(),
            icon: icon.to_string(),
            category,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    definitions: Vec<BlockDefinition>,
}

impl BlockRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in block type, in palette order
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        let builtins = [
            BlockDefinition::new(BlockType::Text, "Text", "text", Category::Content),
            BlockDefinition::new(BlockType::Image, "Image", "photo", Category::Media),
            BlockDefinition::new(BlockType::Button, "Button", "cursor-click", Category::Content),
            BlockDefinition::new(BlockType::Divider, "Divider", "minus", Category::Layout),
            BlockDefinition::new(BlockType::Spacer, "Spacer", "arrows-vertical", Category::Layout),
            BlockDefinition::new(BlockType::Columns, "2 Columns", "columns-2", Category::Layout),
            BlockDefinition::new(BlockType::Columns3, "3 Columns", "columns-3", Category::Layout),
            BlockDefinition::new(BlockType::Html, "Custom HTML", "code", Category::Advanced),
            BlockDefinition::new(BlockType::Article, "Article", "newspaper", Category::Content),
        ];
        for definition in builtins {
            // Tags in the builtin list are distinct
            let _ = registry.register(definition);
        }
        registry
    }

    /// Register a block type. The first registration of a tag stays in effect.
    pub fn register(&mut self, definition: BlockDefinition) -> Result<(), RegistryError> {
        if self.has(definition.tag()) {
            tracing::warn!(tag = definition.tag(), "block type is already registered");
            return Err(RegistryError::AlreadyRegistered(definition.tag().to_string()));
        }
        tracing::debug!(tag = definition.tag(), "registered block type");
        self.definitions.push(definition);
        Ok(())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.metadata(tag).is_some()
    }

    /// Registered tags in registration order
    pub fn list_types(&self) -> Vec<&'static str> {
        self.definitions.iter().map(|d| d.tag()).collect()
    }

    pub fn metadata(&self, tag: &str) -> Option<&BlockDefinition> {
        self.definitions.iter().find(|d| d.tag() == tag)
    }

    /// Definitions grouped by palette category, groups in order of first appearance
    pub fn by_category(&self) -> Vec<(Category, Vec<&BlockDefinition>)> {
        let mut groups: Vec<(Category, Vec<&BlockDefinition>)> = Vec::new();
        for definition in &self.definitions {
            match groups.iter_mut().find(|(c, _)| *c == definition.category) {
                Some((_, members)) => members.push(definition),
                None => groups.push((definition.category, vec![definition])),
            }
        }
        groups
    }

    /// Create a block of type `tag` with a fresh id, merging `overrides` onto the defaults
    pub fn create(
        &self,
        tag: &str,
        overrides: Option<&ConfigPatch>,
        ids: &mut IdGenerator,
    ) -> Result<Block, RegistryError> {
        let definition = self
            .metadata(tag)
            .ok_or_else(|| RegistryError::UnknownType(tag.to_string()))?;

        let mut block = Block::new(ids.new_id(), definition.kind.default_config());
        if let Some(patch) = overrides.filter(|p| !p.is_empty()) {
            block.update_config(patch)?;
        }
        Ok(block)
    }

    pub fn create_kind(&self, kind: BlockType, ids: &mut IdGenerator) -> Result<Block, RegistryError> {
        self.create(kind.tag(), None, ids)
    }

    /// Rebuild one block (and its nested blocks) from `{id, type, config}` JSON
    pub fn block_from_value(&self, value: Value) -> Result<Block, RegistryError> {
        self.check_types(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Rebuild a serialized block list.
    ///
    /// Every id in the list, nested ones included, must be unique; all of them are recorded
    /// in `ids` so later generated ids cannot collide.
    pub fn load_list(&self, json: &str, ids: &mut IdGenerator) -> Result<Vec<Block>, RegistryError> {
        let value: Value = serde_json::from_str(json)?;
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(RegistryError::Json("expected an array of blocks".to_string())),
        };

        let blocks = items
            .into_iter()
            .map(|item| self.block_from_value(item))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        let all_ids = blocks.iter().flat_map(|block| {
            std::iter::once(block.id()).chain(
                block
                    .columns()
                    .into_iter()
                    .flat_map(|c| c.all_blocks().map(|b| b.id())),
            )
        });
        for id in all_ids {
            if !seen.insert(id) {
                return Err(RegistryError::DuplicateId(id.to_string()));
            }
        }
        for id in seen {
            ids.observe(id);
        }

        tracing::debug!(count = blocks.len(), "loaded block list");
        Ok(blocks)
    }

    fn check_types(&self, value: &Value) -> Result<(), RegistryError> {
        let tag = value.get("type").and_then(Value::as_str).unwrap_or_default();
        if !self.has(tag) {
            return Err(RegistryError::UnknownType(tag.to_string()));
        }

        let slots = value
            .get("config")
            .and_then(|c| c.get("columns"))
            .and_then(Value::as_array);
        for slot in slots.into_iter().flatten() {
            let nested = slot.get("blocks").and_then(Value::as_array);
            for block in nested.into_iter().flatten() {
                self.check_types(block)?;
            }
        }
        Ok(())
    }
}

//! # Blocks
//!
//! A block is an id plus a variant configuration. The variant set is closed: every block type
//! the editor knows about is a `BlockConfig` arm, and the `type` tag only exists as a string
//! at the JSON boundary.

use crate::article::ArticleConfig;
use crate::columns::ColumnsConfig;
use crate::config::{ButtonConfig, DividerConfig, HtmlConfig, ImageConfig, SpacerConfig, TextConfig};
use crate::patch::{apply_patch, get_path};
use crate::{BlockError, ConfigPatch, IdGenerator};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Block type tag as it appears in serialized documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Button,
    Image,
    Divider,
    Spacer,
    Html,
    Columns,
    Columns3,
    Article,
}

impl BlockType {
    /// Every built-in type, in palette order
    pub const ALL: [BlockType; 9] = [
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Columns,
        BlockType::Columns3,
        BlockType::Html,
        BlockType::Article,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Button => "button",
            BlockType::Image => "image",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Html => "html",
            BlockType::Columns => "columns",
            BlockType::Columns3 => "columns3",
            BlockType::Article => "article",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Number of column slots, zero for non-containers
    pub fn slot_count(&self) -> usize {
        match self {
            BlockType::Columns => 2,
            BlockType::Columns3 => 3,
            _ => 0,
        }
    }

    pub fn is_container(&self) -> bool {
        self.slot_count() > 0
    }

    pub fn default_config(&self) -> BlockConfig {
        match self {
            BlockType::Text => BlockConfig::Text(TextConfig::default()),
            BlockType::Button => BlockConfig::Button(ButtonConfig::default()),
            BlockType::Image => BlockConfig::Image(ImageConfig::default()),
            BlockType::Divider => BlockConfig::Divider(DividerConfig::default()),
            BlockType::Spacer => BlockConfig::Spacer(SpacerConfig::default()),
            BlockType::Html => BlockConfig::Html(HtmlConfig::default()),
            BlockType::Columns | BlockType::Columns3 => {
                BlockConfig::Columns(ColumnsConfig::with_slots(self.slot_count()))
            }
            BlockType::Article => BlockConfig::Article(ArticleConfig::default()),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Variant configuration of a block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockConfig {
    Text(TextConfig),
    Button(ButtonConfig),
    Image(ImageConfig),
    Divider(DividerConfig),
    Spacer(SpacerConfig),
    Html(HtmlConfig),
    /// Two- and three-column containers share one representation
    Columns(ColumnsConfig),
    Article(ArticleConfig),
}

impl BlockConfig {
    pub fn kind(&self) -> BlockType {
        match self {
            BlockConfig::Text(_) => BlockType::Text,
            BlockConfig::Button(_) => BlockType::Button,
            BlockConfig::Image(_) => BlockType::Image,
            BlockConfig::Divider(_) => BlockType::Divider,
            BlockConfig::Spacer(_) => BlockType::Spacer,
            BlockConfig::Html(_) => BlockType::Html,
            BlockConfig::Columns(c) if c.slot_count() == 3 => BlockType::Columns3,
            BlockConfig::Columns(_) => BlockType::Columns,
            BlockConfig::Article(_) => BlockType::Article,
        }
    }

    pub fn to_value(&self) -> Result<Value, BlockError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Build the configuration of `kind` from JSON, filling missing fields with defaults
    pub fn from_value(kind: BlockType, value: Value) -> Result<Self, BlockError> {
        let value = match value {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        let config = match kind {
            BlockType::Text => BlockConfig::Text(serde_json::from_value(value)?),
            BlockType::Button => BlockConfig::Button(serde_json::from_value(value)?),
            BlockType::Image => BlockConfig::Image(serde_json::from_value(value)?),
            BlockType::Divider => BlockConfig::Divider(serde_json::from_value(value)?),
            BlockType::Spacer => BlockConfig::Spacer(serde_json::from_value(value)?),
            BlockType::Html => BlockConfig::Html(serde_json::from_value(value)?),
            BlockType::Columns | BlockType::Columns3 => BlockConfig::Columns(
                ColumnsConfig::from_value(value, kind.tag(), kind.slot_count())?,
            ),
            BlockType::Article => BlockConfig::Article(serde_json::from_value(value)?),
        };
        Ok(config)
    }
}

impl Serialize for BlockConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockConfig::Text(c) => c.serialize(serializer),
            BlockConfig::Button(c) => c.serialize(serializer),
            BlockConfig::Image(c) => c.serialize(serializer),
            BlockConfig::Divider(c) => c.serialize(serializer),
            BlockConfig::Spacer(c) => c.serialize(serializer),
            BlockConfig::Html(c) => c.serialize(serializer),
            BlockConfig::Columns(c) => c.serialize(serializer),
            BlockConfig::Article(c) => c.serialize(serializer),
        }
    }
}

/// Result of a block's structural checks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: String,
    config: BlockConfig,
}

impl Block {
    pub fn new(id: impl Into<String>, config: BlockConfig) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> BlockType {
        self.config.kind()
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn columns(&self) -> Option<&ColumnsConfig> {
        match &self.config {
            BlockConfig::Columns(c) => Some(c),
            _ => None,
        }
    }

    pub fn columns_mut(&mut self) -> Option<&mut ColumnsConfig> {
        match &mut self.config {
            BlockConfig::Columns(c) => Some(c),
            _ => None,
        }
    }

    pub fn article(&self) -> Option<&ArticleConfig> {
        match &self.config {
            BlockConfig::Article(c) => Some(c),
            _ => None,
        }
    }

    /// Container of this block, or `NotAContainer`
    pub fn expect_columns_mut(&mut self) -> Result<&mut ColumnsConfig, BlockError> {
        let id = self.id.clone();
        self.columns_mut().ok_or(BlockError::NotAContainer(id))
    }

    /// Apply a configuration patch.
    ///
    /// The patched configuration is re-read as the block's own variant before it replaces the
    /// current one, so a patch that does not type-check leaves the block untouched.
    pub fn update_config(&mut self, patch: &ConfigPatch) -> Result<(), BlockError> {
        let kind = self.kind();

        if kind.is_container() {
            if let Some(key) = patch
                .keys()
                .find(|k| *k == "columns" || k.starts_with("columns."))
            {
                return Err(BlockError::ProtectedField(key.clone()));
            }
        }

        let mut value = self.config.to_value()?;
        for key in patch.keys() {
            let root = key.split('.').next().unwrap_or(key);
            if value.get(root).is_none() {
                return Err(BlockError::UnknownField {
                    kind: kind.tag().to_string(),
                    field: key.clone(),
                });
            }
        }

        apply_patch(&mut value, patch)?;
        self.config = BlockConfig::from_value(kind, value)?;
        Ok(())
    }

    /// Read one configuration property by dotted path
    pub fn get_field(&self, path: &str) -> Option<Value> {
        let value = self.config.to_value().ok()?;
        get_path(&value, path).cloned()
    }

    /// Deep copy with a fresh id for this block and every nested block
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Block {
        let mut copy = self.clone();
        copy.id = ids.new_id();
        if let Some(columns) = copy.columns_mut() {
            for nested in columns.all_blocks_mut() {
                nested.id = ids.new_id();
            }
        }
        copy
    }

    pub fn validate(&self) -> Validation {
        let mut errors = Vec::new();

        match &self.config {
            BlockConfig::Text(c) => {
                if c.text.trim().is_empty() {
                    errors.push("Text cannot be empty".to_string());
                }
            }
            BlockConfig::Button(c) => {
                if c.text.trim().is_empty() {
                    errors.push("Button text cannot be empty".to_string());
                }
                if !is_absolute_url(&c.url) {
                    errors.push("URL must start with http:// or https://".to_string());
                }
            }
            BlockConfig::Image(c) => {
                if !is_absolute_url(&c.src) {
                    errors.push("Image URL must start with http:// or https://".to_string());
                }
                if !c.link.is_empty() && !is_absolute_url(&c.link) {
                    errors.push("Link must start with http:// or https://".to_string());
                }
            }
            _ => {}
        }

        Validation::from_errors(errors)
    }

    fn from_raw(raw: RawBlock) -> Result<Self, String> {
        let kind = BlockType::from_tag(&raw.kind)
            .ok_or_else(|| format!("unknown block type \"{}\"", raw.kind))?;
        let config = BlockConfig::from_value(kind, raw.config).map_err(|e| e.to_string())?;
        Ok(Block::new(raw.id, config))
    }
}

pub(crate) fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[derive(Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    config: Value,
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.kind().tag())?;
        state.serialize_field("config", &self.config)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBlock::deserialize(deserializer)?;
        Block::from_raw(raw).map_err(D::Error::custom)
    }
}

//! # Mailblocks Blocks
//!
//! The block model shared by every other Mailblocks crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: type tag → definition + defaults  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ block: Block { id, config: BlockConfig }    │
//! │  - leaf variants (text, button, image, ...) │
//! │  - columns: N fixed slots of nested blocks  │
//! │  - article: image + title + description     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: editor markup / email markup     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Closed variant set**: `BlockConfig` is a sum type, so an unknown block type can only
//!    appear at the JSON boundary
//! 2. **Owned tree**: containers own their nested blocks by value, one level deep
//! 3. **Patches, not setters**: configuration changes go through dotted-path patches that are
//!    type-checked before they replace the config

mod article;
mod block;
mod columns;
mod config;
mod error;
mod id;
mod patch;
mod position;
mod registry;
mod sanitize;
mod schema;
mod selection;
mod visitor;

pub use article::{
    break_article, ArticleConfig, ArticleDescription, ArticleImage, ArticleLink, ArticleTitle,
};
pub use block::{Block, BlockConfig, BlockType, Validation};
pub use columns::{ColumnSlot, ColumnsConfig};
pub use config::{
    css_value, px_value, Align, BorderStyle, ButtonConfig, DividerConfig, HtmlConfig, ImageConfig,
    SpacerConfig, TextConfig, VerticalAlign,
};
pub use error::BlockError;
pub use id::{get_document_seed, IdGenerator};
pub use patch::{apply_patch, get_path, set_path, ConfigPatch};
pub use position::{move_within, reinsert_index};
pub use registry::{BlockDefinition, BlockRegistry, Category, RegistryError};
pub use sanitize::{email_warnings, neutralize_email_layout, sanitize_html, EmailWarning};
pub use schema::{column_property_schema, property_schema, PropertyField, SelectOption, Widget};
pub use selection::{NestedRef, Selection};
pub use visitor::{walk_block, walk_blocks, walk_column, BlockLocation, Visitor};

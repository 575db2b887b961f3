//! Error types for the block model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Invalid column index {index} (container has {count} columns)")]
    InvalidColumnIndex { index: usize, count: usize },

    #[error("Container blocks cannot be nested inside a column")]
    NestedContainer,

    #[error("Block type \"{kind}\" expects {expected} columns, found {found}")]
    SlotCountMismatch {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("Block is not a container: {0}")]
    NotAContainer(String),

    #[error("Block is not an article: {0}")]
    NotAnArticle(String),

    #[error("Unknown field \"{field}\" for block type \"{kind}\"")]
    UnknownField { kind: String, field: String },

    #[error("Field \"{0}\" cannot be patched directly")]
    ProtectedField(String),

    #[error("Invalid property path: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for BlockError {
    fn from(e: serde_json::Error) -> Self {
        BlockError::InvalidConfig(e.to_string())
    }
}

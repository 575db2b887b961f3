//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Load error: {0}")]
    Registry(#[from] mailblocks_blocks::RegistryError),

    #[error("Compile error: {0}")]
    Compile(#[from] mailblocks_compiler_email::CompileError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The save collaborator rejected the request; the message is passed through verbatim
    #[error("{0}")]
    Save(String),
}

//! # Mailblocks Editor
//!
//! Builder state for Mailblocks: the document tree a host UI edits.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host UI: clicks, drags, property edits      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document + mutations                │
//! │  - Load/save through collaborators          │
//! │  - Apply mutations with validation          │
//! │  - Selection state machine                  │
//! │  - Drag state and drop-position resolution  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: canvas markup / email document   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: canvas markup and email HTML are re-derived on demand
//! 2. **Validate, then mutate**: a rejected mutation changes nothing
//! 3. **Stale ids are harmless**: a mutation on a block that is gone reports no change
//! 4. **Collaborators at the edge**: storage sits behind `DocumentStore`/`DocumentSource`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailblocks_editor::{Document, Mutation};
//!
//! let mut doc = Document::new("welcome");
//! doc.apply(Mutation::InsertTop {
//!     block_type: "text".to_string(),
//!     index: None,
//!     overrides: None,
//! })?;
//!
//! let canvas = doc.render();
//! let html = doc.generate_html()?;
//! ```

pub mod confirm;
pub mod document;
pub mod drag;
pub mod errors;
pub mod mutations;
pub mod storage;

pub use confirm::{AutoConfirm, ConfirmationGate};
pub use document::Document;
pub use drag::{resolve_drop_index, DragSource, DragState, Rect};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use storage::{DocumentSource, DocumentStore, MemoryStore, SaveRequest, SaveResponse};

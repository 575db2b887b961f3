//! # Mailblocks Editor Compiler
//!
//! Renders the interactive canvas markup the editor UI displays. Every element a user can
//! act on carries `data-*` attributes naming the block, container and column it belongs to;
//! the UI layer binds its handlers from those attributes.

mod context;
mod numbering;
mod render;

pub use context::{EditorContext, EditorRenderOptions};
pub use numbering::ArticleNumbering;
pub use render::{render_canvas, render_editor};

//! # Mailblocks Email Compiler
//!
//! Renders a block tree as table-based markup that email clients can display, and wraps it
//! in the fixed email document skeleton.

mod blocks;
mod compiler;
mod context;

pub use compiler::{generate_document, render_blocks, render_email};
pub use context::{CompileError, CompileOptions, EMAIL_WIDTH};

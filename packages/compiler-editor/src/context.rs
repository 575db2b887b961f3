use crate::ArticleNumbering;
use mailblocks_blocks::Selection;
use serde::{Deserialize, Serialize};

/// Options for editor rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorRenderOptions {
    /// Shown when the document has no blocks
    pub empty_canvas_text: String,
    /// Shown inside an empty column
    pub empty_column_text: String,
    /// Render the duplicate/break/delete toolbar on nested blocks
    pub nested_toolbar: bool,
}

impl Default for EditorRenderOptions {
    fn default() -> Self {
        Self {
            empty_canvas_text: "Add blocks from the palette on the left".to_string(),
            empty_column_text: "Drop a block here".to_string(),
            nested_toolbar: true,
        }
    }
}

/// Everything a block needs to know about the editor while rendering itself
#[derive(Debug, Clone, Copy)]
pub struct EditorContext<'a> {
    pub selection: &'a Selection,
    pub numbering: &'a ArticleNumbering,
    pub options: &'a EditorRenderOptions,
}

impl<'a> EditorContext<'a> {
    pub fn new(
        selection: &'a Selection,
        numbering: &'a ArticleNumbering,
        options: &'a EditorRenderOptions,
    ) -> Self {
        Self {
            selection,
            numbering,
            options,
        }
    }
}

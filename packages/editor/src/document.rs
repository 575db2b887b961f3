//! # Document Handle
//!
//! A `Document` is one email being edited: its block tree, the current selection, the
//! transient drag state and the metadata a save needs.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Render → Save
//!   ↓      ↓       ↓        ↓
//! JSON  Mutations Canvas  SaveRequest (JSON + email HTML)
//! ```

use crate::drag::{resolve_drop_index, DragSource, DragState, Rect};
use crate::storage::{DocumentSource, DocumentStore, SaveRequest};
use crate::{AutoConfirm, ConfirmationGate, EditorError, Mutation, MutationResult};
use mailblocks_blocks::{Block, BlockRegistry, IdGenerator, Selection};
use mailblocks_compiler_editor::{render_canvas, EditorRenderOptions};
use mailblocks_compiler_email::{generate_document, CompileOptions};
use std::fmt;
use tracing::{debug, info};

/// Editable email document
pub struct Document {
    pub name: String,
    pub description: String,

    /// Id assigned by the save collaborator; `None` until the first successful save
    pub remote_id: Option<String>,

    /// Current version number (increments on each change)
    pub version: u64,

    pub render_options: EditorRenderOptions,
    pub compile_options: CompileOptions,

    pub(crate) blocks: Vec<Block>,
    pub(crate) selection: Selection,
    pub(crate) ids: IdGenerator,
    pub(crate) registry: BlockRegistry,
    drag: DragState,
    gate: Box<dyn ConfirmationGate>,
}

impl Document {
    /// Empty document using the built-in block types
    pub fn new(name: &str) -> Self {
        Self::with_registry(name, BlockRegistry::with_builtins())
    }

    pub fn with_registry(name: &str, registry: BlockRegistry) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            remote_id: None,
            version: 0,
            render_options: EditorRenderOptions::default(),
            compile_options: CompileOptions {
                title: name.to_string(),
                ..CompileOptions::default()
            },
            blocks: Vec::new(),
            selection: Selection::None,
            ids: IdGenerator::new(name),
            registry,
            drag: DragState::default(),
            gate: Box::new(AutoConfirm),
        }
    }

    /// Create a document from a serialized block list
    pub fn from_json(name: &str, json: &str) -> Result<Self, EditorError> {
        let mut doc = Self::new(name);
        doc.load(json)?;
        Ok(doc)
    }

    /// Fetch a stored document through the load collaborator
    pub fn open(name: &str, id: &str, source: &dyn DocumentSource) -> Result<Self, EditorError> {
        let json = source
            .fetch(id)
            .ok_or_else(|| EditorError::DocumentNotFound(id.to_string()))?;
        let mut doc = Self::from_json(name, &json)?;
        doc.remote_id = Some(id.to_string());
        Ok(doc)
    }

    /// Replace the tree with a serialized block list. On error the current tree is kept.
    pub fn load(&mut self, json: &str) -> Result<(), EditorError> {
        let mut ids = IdGenerator::from_seed(self.ids.seed().to_string());
        let blocks = self.registry.load_list(json, &mut ids)?;
        info!(name = %self.name, blocks = blocks.len(), "loaded document");

        self.blocks = blocks;
        self.ids = ids;
        self.selection = Selection::None;
        self.drag.end();
        self.version += 1;
        Ok(())
    }

    pub fn set_confirmation_gate(&mut self, gate: impl ConfirmationGate + 'static) {
        self.gate = Box::new(gate);
    }

    /// Apply a mutation. Deletes ask the confirmation gate first; a declined delete is
    /// reported as unchanged.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        if let Some(prompt) = mutation.confirmation_prompt() {
            if !self.gate.confirm(prompt) {
                debug!(?mutation, "delete declined");
                return Ok(self.result(false));
            }
        }

        let changed = mutation.apply(self)?;
        if changed {
            self.version += 1;
        }
        debug!(?mutation, changed, version = self.version, "applied mutation");
        Ok(self.result(changed))
    }

    fn result(&self, changed: bool) -> MutationResult {
        MutationResult {
            version: self.version,
            changed,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find_map(|block| {
            if block.id() == id {
                return Some(block);
            }
            block.columns()?.all_blocks().find(|nested| nested.id() == id)
        })
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn drag_start(&mut self, source: DragSource) {
        debug!(?source, "drag started");
        self.drag.start(source);
    }

    /// Drag ended without a drop
    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    /// Drop the current drag onto the top-level canvas. `rects` are the rendered top-level
    /// blocks in order.
    pub fn drop_on_canvas(&mut self, y: f64, rects: &[Rect]) -> Result<MutationResult, EditorError> {
        let Some(source) = self.drag.take() else {
            return Ok(self.result(false));
        };
        let index = resolve_drop_index(y, rects);
        debug!(?source, index, "drop on canvas");

        let mutation = match source {
            DragSource::Palette { block_type } => Mutation::InsertTop {
                block_type,
                index: Some(index),
                overrides: None,
            },
            DragSource::TopBlock { id } => Mutation::MoveTop { id, to: index },
            DragSource::Nested { entry } => Mutation::MoveOutOfColumn {
                target: entry,
                index: Some(index),
            },
        };
        self.apply(mutation)
    }

    /// Drop the current drag into a column. `rects` are the column's rendered nested blocks.
    pub fn drop_in_column(
        &mut self,
        container_id: &str,
        column_index: usize,
        y: f64,
        rects: &[Rect],
    ) -> Result<MutationResult, EditorError> {
        let Some(source) = self.drag.take() else {
            return Ok(self.result(false));
        };
        let index = resolve_drop_index(y, rects);
        debug!(?source, container_id, column_index, index, "drop in column");

        let mutation = match source {
            DragSource::Palette { block_type } => Mutation::AddToColumn {
                container_id: container_id.to_string(),
                column_index,
                block_type,
                index: Some(index),
                overrides: None,
            },
            DragSource::TopBlock { id } => Mutation::MoveIntoColumn {
                id,
                container_id: container_id.to_string(),
                column_index,
                index: Some(index),
            },
            DragSource::Nested { entry } => Mutation::MoveNested {
                target: entry,
                to_container_id: container_id.to_string(),
                to_column_index: column_index,
                index,
            },
        };
        self.apply(mutation)
    }

    /// Serialized block list
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(&self.blocks)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    /// Editor canvas markup for the current tree and selection
    pub fn render(&self) -> String {
        render_canvas(&self.blocks, &self.selection, &self.render_options)
    }

    /// Standalone email document
    pub fn generate_html(&self) -> Result<String, EditorError> {
        Ok(generate_document(&self.blocks, &self.compile_options)?)
    }

    pub fn save_request(&self) -> Result<SaveRequest, EditorError> {
        Ok(SaveRequest {
            id: self.remote_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            blocks: self.to_json()?,
            html: self.generate_html()?,
        })
    }

    /// Save through the store. A new id returned by the store is recorded; on failure the
    /// store's message is returned and the document is left as it was.
    pub fn save(&mut self, store: &mut dyn DocumentStore) -> Result<(), EditorError> {
        let request = self.save_request()?;
        let response = store.save(&request);

        if !response.success {
            let message = response.error.unwrap_or_else(|| "Unknown error".to_string());
            info!(name = %self.name, %message, "save failed");
            return Err(EditorError::Save(message));
        }

        if let Some(id) = response.new_id {
            self.remote_id = Some(id);
        }
        info!(name = %self.name, id = ?self.remote_id, "saved document");
        Ok(())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("remote_id", &self.remote_id)
            .field("version", &self.version)
            .field("blocks", &self.blocks)
            .field("selection", &self.selection)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory_document() {
        let doc = Document::new("welcome");

        assert_eq!(doc.version, 0);
        assert!(doc.blocks().is_empty());
        assert!(doc.selection().is_none());
        assert_eq!(doc.compile_options.title, "welcome");
        assert!(doc.render().contains("canvas-empty"));
    }

    #[test]
    fn test_failed_load_keeps_tree() {
        let mut doc = Document::new("welcome");
        doc.apply(Mutation::InsertTop {
            block_type: "text".to_string(),
            index: None,
            overrides: None,
        })
        .unwrap();

        let err = doc.load(r#"[{"id":"x","type":"carousel","config":{}}]"#);
        assert!(err.is_err());
        assert_eq!(doc.blocks().len(), 1);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let mut doc = Document::new("welcome");
        let result = doc.drop_on_canvas(10.0, &[]).unwrap();
        assert!(!result.changed);
        assert!(doc.blocks().is_empty());
    }
}

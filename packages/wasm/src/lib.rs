use mailblocks_blocks::{column_property_schema, property_schema, BlockType, NestedRef};
use mailblocks_editor::{Document, DragSource, EditorError, Mutation, MutationResult, Rect};
use serde_json::json;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_rects(rects_json: &str) -> Result<Vec<Rect>, EditorError> {
    Ok(serde_json::from_str(rects_json)?)
}

/// Browser handle on one email document
#[wasm_bindgen]
pub struct EmailBuilder {
    doc: Document,
}

#[wasm_bindgen]
impl EmailBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str) -> EmailBuilder {
        EmailBuilder {
            doc: Document::new(name),
        }
    }

    /// Replace the tree with a serialized block list
    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        self.doc.load(json).map_err(js_error)
    }

    /// Apply a mutation given as JSON, e.g. `{"type":"deleteTop","id":"..."}`
    pub fn apply(&mut self, mutation_json: &str) -> Result<bool, JsValue> {
        self.apply_json(mutation_json).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.doc.version as f64
    }

    #[wasm_bindgen(js_name = selectBlock)]
    pub fn select_block(&mut self, id: &str, additive: bool) -> Result<bool, JsValue> {
        self.run(Mutation::SelectTop {
            id: id.to_string(),
            additive,
        })
    }

    #[wasm_bindgen(js_name = selectColumn)]
    pub fn select_column(&mut self, container_id: &str, column_index: usize) -> Result<bool, JsValue> {
        self.run(Mutation::SelectColumn {
            container_id: container_id.to_string(),
            column_index,
        })
    }

    #[wasm_bindgen(js_name = selectNested)]
    pub fn select_nested(
        &mut self,
        container_id: &str,
        column_index: usize,
        block_id: &str,
        additive: bool,
    ) -> Result<bool, JsValue> {
        self.run(Mutation::SelectNested {
            target: NestedRef::new(container_id, column_index, block_id),
            additive,
        })
    }

    #[wasm_bindgen(js_name = deselectAll)]
    pub fn deselect_all(&mut self) -> Result<bool, JsValue> {
        self.run(Mutation::DeselectAll)
    }

    /// Current selection as JSON
    #[wasm_bindgen(js_name = selection)]
    pub fn selection_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.doc.selection())
            .map_err(|e| js_error(EditorError::Json(e)))
    }

    #[wasm_bindgen(js_name = dragStartPalette)]
    pub fn drag_start_palette(&mut self, block_type: &str) {
        self.doc.drag_start(DragSource::Palette {
            block_type: block_type.to_string(),
        });
    }

    #[wasm_bindgen(js_name = dragStartBlock)]
    pub fn drag_start_block(&mut self, id: &str) {
        self.doc.drag_start(DragSource::TopBlock { id: id.to_string() });
    }

    #[wasm_bindgen(js_name = dragStartNested)]
    pub fn drag_start_nested(&mut self, container_id: &str, column_index: usize, block_id: &str) {
        self.doc.drag_start(DragSource::Nested {
            entry: NestedRef::new(container_id, column_index, block_id),
        });
    }

    /// Drag finished without a drop
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self) {
        self.doc.drag_end();
    }

    /// Drop on the top-level canvas; `rects_json` lists `{top, height}` of each top-level block
    #[wasm_bindgen(js_name = dropOnCanvas)]
    pub fn drop_on_canvas(&mut self, y: f64, rects_json: &str) -> Result<bool, JsValue> {
        let rects = parse_rects(rects_json).map_err(js_error)?;
        self.doc
            .drop_on_canvas(y, &rects)
            .map(|r| r.changed)
            .map_err(js_error)
    }

    /// Drop into a container column; `rects_json` lists the column's blocks
    #[wasm_bindgen(js_name = dropInColumn)]
    pub fn drop_in_column(
        &mut self,
        container_id: &str,
        column_index: usize,
        y: f64,
        rects_json: &str,
    ) -> Result<bool, JsValue> {
        let rects = parse_rects(rects_json).map_err(js_error)?;
        self.doc
            .drop_in_column(container_id, column_index, y, &rects)
            .map(|r| r.changed)
            .map_err(js_error)
    }

    /// Editor canvas markup
    pub fn render(&self) -> String {
        self.doc.render()
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.doc.to_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = generateHtml)]
    pub fn generate_html(&self) -> Result<String, JsValue> {
        self.doc.generate_html().map_err(js_error)
    }

    /// Payload for the host's save call, as JSON
    #[wasm_bindgen(js_name = saveRequest)]
    pub fn save_request(&mut self, description: &str) -> Result<String, JsValue> {
        self.save_request_json(description).map_err(js_error)
    }

    /// Palette groups as JSON: `[{"category": "content", "blocks": [{type, label, icon}]}]`
    pub fn palette(&self) -> Result<String, JsValue> {
        let groups: Vec<_> = self
            .doc
            .registry()
            .by_category()
            .into_iter()
            .map(|(category, blocks)| json!({ "category": category, "blocks": blocks }))
            .collect();
        serde_json::to_string(&groups).map_err(|e| js_error(EditorError::Json(e)))
    }

    /// Property-panel fields for a block type, as JSON
    #[wasm_bindgen(js_name = propertySchema)]
    pub fn property_schema(&self, block_type: &str) -> Result<String, JsValue> {
        let kind = BlockType::from_tag(block_type)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown block type: {block_type}")))?;
        serde_json::to_string(&property_schema(kind)).map_err(|e| js_error(EditorError::Json(e)))
    }

    /// Property-panel fields for a column slot, as JSON
    #[wasm_bindgen(js_name = columnPropertySchema)]
    pub fn column_property_schema(&self) -> Result<String, JsValue> {
        serde_json::to_string(&column_property_schema()).map_err(|e| js_error(EditorError::Json(e)))
    }

    /// Record the id the host's save call returned
    #[wasm_bindgen(js_name = setRemoteId)]
    pub fn set_remote_id(&mut self, id: &str) {
        self.doc.remote_id = Some(id.to_string());
    }
}

impl EmailBuilder {
    fn run(&mut self, mutation: Mutation) -> Result<bool, JsValue> {
        self.doc
            .apply(mutation)
            .map(|r| r.changed)
            .map_err(js_error)
    }

    fn apply_json(&mut self, mutation_json: &str) -> Result<bool, EditorError> {
        let mutation: Mutation = serde_json::from_str(mutation_json)?;
        let MutationResult { changed, .. } = self.doc.apply(mutation)?;
        Ok(changed)
    }

    fn save_request_json(&mut self, description: &str) -> Result<String, EditorError> {
        self.doc.description = description.to_string();
        let request = self.doc.save_request()?;
        Ok(serde_json::to_string(&request)?)
    }
}

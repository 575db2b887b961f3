#![cfg(target_arch = "wasm32")]

use mailblocks_wasm::EmailBuilder;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn load_rejects_bad_json() {
    let mut builder = EmailBuilder::new("Broken");
    assert!(builder.load("not json").is_err());
    assert_eq!(builder.to_json().unwrap(), "[]");
}

#[wasm_bindgen_test]
fn drop_into_column() {
    let mut builder = EmailBuilder::new("Columns");
    builder
        .load(r#"[{"id":"cols","type":"columns","config":{}}]"#)
        .unwrap();

    builder.drag_start_palette("button");
    assert!(builder.drop_in_column("cols", 1, 0.0, "[]").unwrap());
    assert!(builder.render().contains("data-parent-block-id=\"cols\""));

    builder.drag_start_palette("columns");
    assert!(builder.drop_in_column("cols", 0, 0.0, "[]").is_err());
}

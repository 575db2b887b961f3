//! Serialized document tests: every variant through the registry and back

use mailblocks_blocks::{
    break_article, ArticleConfig, Block, BlockConfig, BlockRegistry, BlockType, IdGenerator,
};
use serde_json::json;

fn sample_document(registry: &BlockRegistry, ids: &mut IdGenerator) -> Vec<Block> {
    let mut blocks: Vec<Block> = BlockType::ALL
        .iter()
        .map(|kind| registry.create_kind(*kind, ids).unwrap())
        .collect();

    let nested = registry
        .create("text", json!({ "text": "Nested" }).as_object(), ids)
        .unwrap();
    let container = blocks
        .iter_mut()
        .find(|b| b.kind() == BlockType::Columns3)
        .unwrap();
    container
        .expect_columns_mut()
        .unwrap()
        .add_to_column(2, nested, None)
        .unwrap();

    blocks
}

#[test]
fn test_every_variant_survives_json_round_trip() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("round-trip");
    let blocks = sample_document(&registry, &mut ids);

    let json = serde_json::to_string(&blocks).unwrap();
    let mut reload_ids = IdGenerator::new("round-trip");
    let reloaded = registry.load_list(&json, &mut reload_ids).unwrap();

    assert_eq!(reloaded, blocks);
    for (before, after) in blocks.iter().zip(&reloaded) {
        assert_eq!(before.kind(), after.kind());
        assert_eq!(before.id(), after.id());
    }
}

#[test]
fn test_nested_blocks_serialize_inside_columns() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("nested");
    let blocks = sample_document(&registry, &mut ids);

    let value = serde_json::to_value(&blocks).unwrap();
    let container = value
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["type"] == "columns3")
        .unwrap();

    let columns = container["config"]["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[2]["blocks"][0]["type"], "text");
    assert_eq!(columns[2]["blocks"][0]["config"]["text"], "Nested");
}

#[test]
fn test_slot_counts_are_fixed() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("slots");

    let mut two = registry.create("columns", None, &mut ids).unwrap();
    let mut three = registry.create("columns3", None, &mut ids).unwrap();
    assert_eq!(two.columns().unwrap().slot_count(), 2);
    assert_eq!(three.columns().unwrap().slot_count(), 3);

    let patch = json!({ "gap": "0px", "backgroundColor": "#fff" });
    two.update_config(patch.as_object().unwrap()).unwrap();
    three.update_config(patch.as_object().unwrap()).unwrap();
    assert_eq!(two.columns().unwrap().slot_count(), 2);
    assert_eq!(three.columns().unwrap().slot_count(), 3);

    let bad = json!([{ "id": "c", "type": "columns", "config": { "columns": [{}, {}, {}] } }]);
    assert!(registry
        .load_list(&bad.to_string(), &mut ids)
        .is_err());
}

#[test]
fn test_loading_nested_container_is_rejected() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("nesting");
    let json = json!([{
        "id": "outer",
        "type": "columns",
        "config": {
            "columns": [
                { "blocks": [{ "id": "inner", "type": "columns3", "config": {} }] },
                {}
            ]
        }
    }]);

    assert!(registry.load_list(&json.to_string(), &mut ids).is_err());
}

#[test]
fn test_image_src_patch_keeps_siblings() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("article");
    let mut article = registry.create("article", None, &mut ids).unwrap();
    let before = article.article().unwrap().clone();

    let patch = json!({ "image.src": "https://cdn.example.com/a.png" });
    article.update_config(patch.as_object().unwrap()).unwrap();

    let after = article.article().unwrap();
    assert_eq!(after.image.src, "https://cdn.example.com/a.png");
    assert_eq!(after.image.alt, before.image.alt);
    assert_eq!(after.image.width, before.image.width);
    assert_eq!(after.image.border_radius, before.image.border_radius);
    assert_eq!(after.title, before.title);
}

#[test]
fn test_article_merge_then_break() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("merge");
    let hello = registry
        .create("text", json!({ "text": "Hello" }).as_object(), &mut ids)
        .unwrap();
    let world = registry
        .create("text", json!({ "text": "World" }).as_object(), &mut ids)
        .unwrap();
    let button = registry
        .create("button", json!({ "url": "https://example.com/read" }).as_object(), &mut ids)
        .unwrap();

    let config = ArticleConfig::from_blocks(&[&hello, &world, &button]);
    assert_eq!(config.link.url, "https://example.com/read");

    let article = Block::new(ids.new_id(), BlockConfig::Article(config));
    let parts = break_article(&article, &mut ids).unwrap();

    let kinds: Vec<BlockType> = parts.iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec![BlockType::Image, BlockType::Text, BlockType::Text]);
    assert_eq!(parts[1].get_field("text"), Some(json!("Hello")));
    assert_eq!(parts[2].get_field("text"), Some(json!("World")));
    assert!(parts.iter().all(|b| b.kind() != BlockType::Button));
}

#[test]
fn test_rss_field_carried_through_json() {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("rss");
    let json = json!([{ "id": "a1", "type": "article", "config": { "rssField": "item.0" } }]);

    let blocks = registry.load_list(&json.to_string(), &mut ids).unwrap();
    assert_eq!(
        blocks[0].article().unwrap().rss_field.as_deref(),
        Some("item.0")
    );

    let value = serde_json::to_value(&blocks).unwrap();
    assert_eq!(value[0]["config"]["rssField"], "item.0");
}

//! Mutation tests against a live document

use mailblocks_blocks::{BlockError, BlockType, NestedRef, Selection};
use mailblocks_editor::{Document, EditorError, Mutation, MutationError};
use serde_json::{json, Value};

fn insert(doc: &mut Document, block_type: &str, overrides: Value) -> String {
    doc.apply(Mutation::InsertTop {
        block_type: block_type.to_string(),
        index: None,
        overrides: overrides.as_object().cloned(),
    })
    .unwrap();
    doc.blocks().last().unwrap().id().to_string()
}

fn add_nested(doc: &mut Document, container: &str, column: usize, overrides: Value) -> String {
    doc.apply(Mutation::AddToColumn {
        container_id: container.to_string(),
        column_index: column,
        block_type: "text".to_string(),
        index: None,
        overrides: overrides.as_object().cloned(),
    })
    .unwrap();
    match doc.selection() {
        Selection::Nested(entry) => entry.block_id.clone(),
        other => panic!("Expected nested selection, got {other:?}"),
    }
}

fn top_ids(doc: &Document) -> Vec<String> {
    doc.blocks().iter().map(|b| b.id().to_string()).collect()
}

fn column_ids(doc: &Document, container: &str, column: usize) -> Vec<String> {
    doc.find_block(container)
        .and_then(|b| b.columns())
        .map(|c| c.columns()[column].blocks().iter().map(|b| b.id().to_string()).collect())
        .unwrap_or_default()
}

fn texts(doc: &mut Document, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| insert(doc, "text", json!({ "text": format!("T{i}") })))
        .collect()
}

#[test]
fn test_move_first_block_to_end() {
    let mut doc = Document::new("moves");
    let ids = texts(&mut doc, 4);

    let result = doc
        .apply(Mutation::MoveTop {
            id: ids[0].clone(),
            to: 4,
        })
        .unwrap();

    assert!(result.changed);
    assert_eq!(top_ids(&doc), vec![ids[1].clone(), ids[2].clone(), ids[3].clone(), ids[0].clone()]);
}

#[test]
fn test_move_block_onto_itself_changes_nothing() {
    let mut doc = Document::new("moves");
    let ids = texts(&mut doc, 4);
    let version = doc.version;

    for to in [1, 2] {
        let result = doc
            .apply(Mutation::MoveTop {
                id: ids[1].clone(),
                to,
            })
            .unwrap();
        assert!(!result.changed);
    }

    assert_eq!(top_ids(&doc), ids);
    assert_eq!(doc.version, version);
}

#[test]
fn test_move_up_and_down_swap_neighbours() {
    let mut doc = Document::new("moves");
    let ids = texts(&mut doc, 3);

    doc.apply(Mutation::MoveTopUp { id: ids[2].clone() }).unwrap();
    assert_eq!(top_ids(&doc), vec![ids[0].clone(), ids[2].clone(), ids[1].clone()]);

    let result = doc.apply(Mutation::MoveTopUp { id: ids[0].clone() }).unwrap();
    assert!(!result.changed);

    doc.apply(Mutation::MoveTopDown { id: ids[0].clone() }).unwrap();
    assert_eq!(top_ids(&doc), vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
}

#[test]
fn test_duplicate_inserts_after_and_selects_copy() {
    let mut doc = Document::new("duplicate");
    let mut ids = texts(&mut doc, 2);
    let columns = insert(&mut doc, "columns", json!({}));
    add_nested(&mut doc, &columns, 0, json!({ "text": "Nested" }));
    ids.push(columns.clone());

    doc.apply(Mutation::DuplicateTop { id: ids[0].clone() }).unwrap();
    let copy = doc.blocks()[1].id().to_string();
    assert_ne!(copy, ids[0]);
    assert_eq!(doc.blocks()[1].config(), doc.blocks()[0].config());
    assert_eq!(doc.selection(), &Selection::Block { id: copy });

    doc.apply(Mutation::DuplicateTop { id: columns.clone() }).unwrap();
    let original = doc.blocks()[3].columns().unwrap().columns()[0].blocks()[0].id().to_string();
    let cloned = doc.blocks()[4].columns().unwrap().columns()[0].blocks()[0].id().to_string();
    assert_ne!(original, cloned);
}

#[test]
fn test_delete_is_gated() {
    let mut doc = Document::new("delete");
    let ids = texts(&mut doc, 2);

    doc.set_confirmation_gate(|_prompt: &str| false);
    let result = doc.apply(Mutation::DeleteTop { id: ids[0].clone() }).unwrap();
    assert!(!result.changed);
    assert_eq!(doc.blocks().len(), 2);

    doc.set_confirmation_gate(|prompt: &str| prompt == "Delete this block?");
    doc.apply(Mutation::SelectTop {
        id: ids[0].clone(),
        additive: false,
    })
    .unwrap();
    let result = doc.apply(Mutation::DeleteTop { id: ids[0].clone() }).unwrap();
    assert!(result.changed);
    assert_eq!(top_ids(&doc), vec![ids[1].clone()]);
    assert!(doc.selection().is_none());
}

#[test]
fn test_stale_ids_are_noops() {
    let mut doc = Document::new("stale");
    texts(&mut doc, 1);
    let version = doc.version;

    for mutation in [
        Mutation::DeleteTop { id: "gone".to_string() },
        Mutation::DuplicateTop { id: "gone".to_string() },
        Mutation::UpdateBlock {
            id: "gone".to_string(),
            patch: json!({ "text": "x" }).as_object().cloned().unwrap(),
        },
        Mutation::DeleteNested {
            target: NestedRef::new("gone", 0, "gone"),
        },
    ] {
        assert!(!doc.apply(mutation).unwrap().changed);
    }
    assert_eq!(doc.version, version);
}

#[test]
fn test_invalid_patch_is_rejected_whole() {
    let mut doc = Document::new("patch");
    let id = insert(&mut doc, "text", json!({ "text": "Keep" }));
    let before = doc.to_json().unwrap();

    let err = doc
        .apply(Mutation::UpdateBlock {
            id,
            patch: json!({ "text": "Changed", "fontSize": "huge" })
                .as_object()
                .cloned()
                .unwrap(),
        })
        .unwrap_err();

    assert!(matches!(err, EditorError::Mutation(MutationError::Block(_))));
    assert_eq!(doc.to_json().unwrap(), before);
}

#[test]
fn test_merge_selection_into_article() {
    let mut doc = Document::new("merge");
    let lead = insert(&mut doc, "divider", json!({}));
    let title = insert(&mut doc, "text", json!({ "text": "Hello" }));
    let description = insert(&mut doc, "text", json!({ "text": "World" }));
    let button = insert(&mut doc, "button", json!({ "url": "https://example.com/read" }));

    for id in [&description, &title, &button] {
        doc.apply(Mutation::SelectTop {
            id: id.clone(),
            additive: true,
        })
        .unwrap();
    }
    doc.apply(Mutation::MergeSelectionIntoArticle).unwrap();

    assert_eq!(doc.blocks().len(), 2);
    assert_eq!(doc.blocks()[0].id(), lead);
    let article = doc.blocks()[1].article().unwrap();
    assert_eq!(article.link.url, "https://example.com/read");
    assert_eq!(
        doc.selection(),
        &Selection::Block {
            id: doc.blocks()[1].id().to_string()
        }
    );
}

#[test]
fn test_merge_then_break_article() {
    let mut doc = Document::new("merge");
    let ids = vec![
        insert(&mut doc, "text", json!({ "text": "Hello" })),
        insert(&mut doc, "text", json!({ "text": "World" })),
        insert(&mut doc, "button", json!({ "text": "Read", "url": "https://example.com" })),
    ];
    for id in &ids {
        doc.apply(Mutation::SelectTop {
            id: id.clone(),
            additive: true,
        })
        .unwrap();
    }
    doc.apply(Mutation::MergeSelectionIntoArticle).unwrap();
    let article_id = doc.blocks()[0].id().to_string();
    let article = doc.blocks()[0].article().unwrap();
    assert_eq!(article.title.text, "Hello");
    assert_eq!(article.description.text, "World");

    doc.apply(Mutation::BreakArticle { id: article_id }).unwrap();
    let kinds: Vec<BlockType> = doc.blocks().iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec![BlockType::Image, BlockType::Text, BlockType::Text]);
    assert_eq!(doc.blocks()[1].get_field("text"), Some(json!("Hello")));
    assert_eq!(doc.blocks()[2].get_field("text"), Some(json!("World")));
    assert!(doc.selection().is_block_selected(doc.blocks()[0].id()));
}

#[test]
fn test_merge_with_empty_selection_fails() {
    let mut doc = Document::new("merge");
    texts(&mut doc, 2);
    doc.apply(Mutation::DeselectAll).unwrap();

    let err = doc.apply(Mutation::MergeSelectionIntoArticle).unwrap_err();
    assert!(matches!(err, EditorError::Mutation(MutationError::EmptySelection)));
    assert_eq!(doc.blocks().len(), 2);
}

#[test]
fn test_cross_column_merge_leaves_columns_untouched() {
    let mut doc = Document::new("merge");
    let container = insert(&mut doc, "columns", json!({}));
    let left = add_nested(&mut doc, &container, 0, json!({ "text": "Left" }));
    let right = add_nested(&mut doc, &container, 1, json!({ "text": "Right" }));
    let before = doc.to_json().unwrap();

    doc.apply(Mutation::SelectNested {
        target: NestedRef::new(&container, 0, &left),
        additive: true,
    })
    .unwrap();
    doc.apply(Mutation::SelectNested {
        target: NestedRef::new(&container, 1, &right),
        additive: true,
    })
    .unwrap();

    let err = doc.apply(Mutation::MergeNestedSelectionIntoArticle).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::SelectionSpansColumns)
    ));
    assert_eq!(doc.to_json().unwrap(), before);
}

#[test]
fn test_nested_merge_keeps_column_position() {
    let mut doc = Document::new("merge");
    let container = insert(&mut doc, "columns3", json!({}));
    let first = add_nested(&mut doc, &container, 2, json!({ "text": "Stays" }));
    let title = add_nested(&mut doc, &container, 2, json!({ "text": "Title" }));
    let body = add_nested(&mut doc, &container, 2, json!({ "text": "Body" }));

    for id in [&body, &title] {
        doc.apply(Mutation::SelectNested {
            target: NestedRef::new(&container, 2, id),
            additive: true,
        })
        .unwrap();
    }
    doc.apply(Mutation::MergeNestedSelectionIntoArticle).unwrap();

    let column = column_ids(&doc, &container, 2);
    assert_eq!(column.len(), 2);
    assert_eq!(column[0], first);

    let article = doc.find_block(&column[1]).and_then(|b| b.article()).unwrap();
    assert_eq!(article.title.text, "Title");
    assert_eq!(article.description.text, "Body");
    assert_eq!(
        doc.selection(),
        &Selection::Nested(NestedRef::new(&container, 2, &column[1]))
    );
}

#[test]
fn test_break_nested_article_in_place() {
    let mut doc = Document::new("break");
    let container = insert(&mut doc, "columns", json!({}));
    add_nested(&mut doc, &container, 1, json!({ "text": "Before" }));
    doc.apply(Mutation::AddToColumn {
        container_id: container.clone(),
        column_index: 1,
        block_type: "article".to_string(),
        index: None,
        overrides: None,
    })
    .unwrap();
    let article = column_ids(&doc, &container, 1)[1].clone();

    doc.apply(Mutation::BreakNestedArticle {
        target: NestedRef::new(&container, 1, &article),
    })
    .unwrap();

    let column = column_ids(&doc, &container, 1);
    assert_eq!(column.len(), 4);
    assert_eq!(doc.find_block(&column[1]).unwrap().kind(), BlockType::Image);
    assert_eq!(
        doc.selection(),
        &Selection::Nested(NestedRef::new(&container, 1, &column[1]))
    );
}

#[test]
fn test_containers_never_enter_columns() {
    let mut doc = Document::new("nesting");
    let outer = insert(&mut doc, "columns", json!({}));
    let inner = insert(&mut doc, "columns3", json!({}));
    let before = doc.to_json().unwrap();

    let err = doc
        .apply(Mutation::AddToColumn {
            container_id: outer.clone(),
            column_index: 0,
            block_type: "columns3".to_string(),
            index: None,
            overrides: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::Block(BlockError::NestedContainer))
    ));

    let err = doc
        .apply(Mutation::MoveIntoColumn {
            id: inner,
            container_id: outer,
            column_index: 1,
            index: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::Block(BlockError::NestedContainer))
    ));
    assert_eq!(doc.to_json().unwrap(), before);
}

#[test]
fn test_invalid_column_index_is_rejected() {
    let mut doc = Document::new("columns");
    let container = insert(&mut doc, "columns", json!({}));

    let err = doc
        .apply(Mutation::AddToColumn {
            container_id: container,
            column_index: 2,
            block_type: "text".to_string(),
            index: None,
            overrides: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::Block(BlockError::InvalidColumnIndex {
            index: 2,
            count: 2
        }))
    ));
}

#[test]
fn test_move_nested_between_columns_and_out() {
    let mut doc = Document::new("nested-moves");
    let container = insert(&mut doc, "columns", json!({}));
    let a = add_nested(&mut doc, &container, 0, json!({ "text": "A" }));
    let b = add_nested(&mut doc, &container, 1, json!({ "text": "B" }));

    doc.apply(Mutation::MoveNested {
        target: NestedRef::new(&container, 0, &a),
        to_container_id: container.clone(),
        to_column_index: 1,
        index: 0,
    })
    .unwrap();
    assert!(column_ids(&doc, &container, 0).is_empty());
    assert_eq!(column_ids(&doc, &container, 1), vec![a.clone(), b.clone()]);

    doc.apply(Mutation::MoveNested {
        target: NestedRef::new(&container, 1, &a),
        to_container_id: container.clone(),
        to_column_index: 1,
        index: 2,
    })
    .unwrap();
    assert_eq!(column_ids(&doc, &container, 1), vec![b.clone(), a.clone()]);

    doc.apply(Mutation::MoveOutOfColumn {
        target: NestedRef::new(&container, 1, &b),
        index: Some(0),
    })
    .unwrap();
    assert_eq!(top_ids(&doc), vec![b.clone(), container.clone()]);
    assert_eq!(column_ids(&doc, &container, 1), vec![a]);
    assert_eq!(doc.selection(), &Selection::Block { id: b });
}

#[test]
fn test_update_column_and_nested_config() {
    let mut doc = Document::new("columns");
    let container = insert(&mut doc, "columns", json!({}));
    let nested = add_nested(&mut doc, &container, 0, json!({}));

    doc.apply(Mutation::UpdateColumn {
        container_id: container.clone(),
        column_index: 1,
        patch: json!({ "backgroundColor": "#fef3c7" }).as_object().cloned().unwrap(),
    })
    .unwrap();
    doc.apply(Mutation::UpdateNested {
        target: NestedRef::new(&container, 0, &nested),
        patch: json!({ "text": "Updated" }).as_object().cloned().unwrap(),
    })
    .unwrap();

    let columns = doc.find_block(&container).and_then(|b| b.columns()).unwrap();
    assert_eq!(columns.columns()[1].background_color, "#fef3c7");
    assert_eq!(
        doc.find_block(&nested).unwrap().get_field("text"),
        Some(json!("Updated"))
    );

    let err = doc
        .apply(Mutation::UpdateBlock {
            id: container,
            patch: json!({ "columns": [] }).as_object().cloned().unwrap(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::Block(BlockError::ProtectedField(_)))
    ));
}

#[test]
fn test_duplicate_and_delete_nested() {
    let mut doc = Document::new("nested");
    let container = insert(&mut doc, "columns", json!({}));
    let nested = add_nested(&mut doc, &container, 0, json!({ "text": "Copy me" }));

    doc.apply(Mutation::DuplicateNested {
        target: NestedRef::new(&container, 0, &nested),
    })
    .unwrap();
    let column = column_ids(&doc, &container, 0);
    assert_eq!(column.len(), 2);
    assert_eq!(column[0], nested);
    assert_eq!(
        doc.selection(),
        &Selection::Nested(NestedRef::new(&container, 0, &column[1]))
    );

    doc.apply(Mutation::DeleteNested {
        target: NestedRef::new(&container, 0, &nested),
    })
    .unwrap();
    assert_eq!(column_ids(&doc, &container, 0), vec![column[1].clone()]);
    assert!(doc.selection().is_none());
}

#[test]
fn test_multi_selection_kinds_are_exclusive() {
    let mut doc = Document::new("selection");
    let top = insert(&mut doc, "text", json!({}));
    let container = insert(&mut doc, "columns", json!({}));
    let nested = add_nested(&mut doc, &container, 0, json!({}));

    doc.apply(Mutation::SelectTop {
        id: top.clone(),
        additive: true,
    })
    .unwrap();
    doc.apply(Mutation::SelectNested {
        target: NestedRef::new(&container, 0, &nested),
        additive: true,
    })
    .unwrap();

    assert!(!doc.selection().is_in_multi(&top));
    assert!(doc.selection().is_in_multi(&nested));

    doc.apply(Mutation::SelectColumn {
        container_id: container.clone(),
        column_index: 1,
    })
    .unwrap();
    assert!(doc.selection().is_column_selected(&container, 1));

    doc.apply(Mutation::DeselectAll).unwrap();
    assert!(doc.selection().is_none());
}

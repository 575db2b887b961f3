use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailblocks_blocks::{Block, BlockRegistry, BlockType, IdGenerator};
use mailblocks_compiler_email::{generate_document, CompileOptions};

fn newsletter(sections: usize) -> Vec<Block> {
    let registry = BlockRegistry::with_builtins();
    let mut ids = IdGenerator::new("bench");
    let mut blocks = Vec::new();

    for _ in 0..sections {
        for kind in BlockType::ALL {
            let mut block = registry.create_kind(kind, &mut ids).unwrap();
            if let Some(columns) = block.columns_mut() {
                for column in 0..columns.slot_count() {
                    let nested = registry.create_kind(BlockType::Text, &mut ids).unwrap();
                    columns.add_to_column(column, nested, None).unwrap();
                }
            }
            blocks.push(block);
        }
    }
    blocks
}

fn generate_small_document(c: &mut Criterion) {
    let blocks = newsletter(1);
    let options = CompileOptions::default();

    c.bench_function("generate_small_document", |b| {
        b.iter(|| generate_document(black_box(&blocks), &options))
    });
}

fn generate_large_document(c: &mut Criterion) {
    let blocks = newsletter(50);
    let options = CompileOptions {
        pretty: false,
        ..CompileOptions::default()
    };

    c.bench_function("generate_large_document", |b| {
        b.iter(|| generate_document(black_box(&blocks), &options))
    });
}

criterion_group!(benches, generate_small_document, generate_large_document);
criterion_main!(benches);

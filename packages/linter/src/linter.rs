use crate::diagnostic::{Diagnostic, DiagnosticLevel, Location};
use crate::rules::RuleRegistry;
use mailblocks_blocks::{walk_block, walk_blocks, Block, BlockLocation, Visitor};

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Drop diagnostics less severe than this
    pub min_level: Option<DiagnosticLevel>,
}

/// Lint a block list, nested blocks included, and return diagnostics in document order
pub fn lint_document(blocks: &[Block], options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let mut linter = BlockLinter {
        registry: &registry,
        diagnostics: Vec::new(),
    };
    walk_blocks(&mut linter, blocks);

    match options.min_level {
        Some(min) => linter
            .diagnostics
            .into_iter()
            .filter(|d| d.level <= min)
            .collect(),
        None => linter.diagnostics,
    }
}

struct BlockLinter<'a> {
    registry: &'a RuleRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl Visitor for BlockLinter<'_> {
    fn visit_block(&mut self, block: &Block, location: &BlockLocation) {
        let location = Location::new(block.id(), location);
        for rule in self.registry.rules() {
            self.diagnostics.extend(rule.check_block(block, &location));
        }

        // Recursively check nested blocks
        walk_block(self, block);
    }
}

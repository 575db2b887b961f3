use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use mailblocks_blocks::Block;

/// Reports every structural error a block's own validation finds
pub struct BlockValidationRule;

impl LintRule for BlockValidationRule {
    fn name(&self) -> &'static str {
        "block-validation"
    }

    fn description(&self) -> &'static str {
        "Blocks must pass their own validation (non-empty text, absolute URLs)"
    }

    fn check_block(&self, block: &Block, location: &Location) -> Vec<Diagnostic> {
        block
            .validate()
            .errors
            .into_iter()
            .map(|error| {
                Diagnostic::error(self.name(), error, location.clone()).with_suggestion(format!(
                    "Edit the {} block's properties",
                    block.kind().tag()
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_blocks::{BlockLocation, BlockRegistry, IdGenerator};
    use serde_json::json;

    fn check(tag: &str, overrides: serde_json::Value) -> Vec<Diagnostic> {
        let mut ids = IdGenerator::new("rules");
        let block = BlockRegistry::with_builtins()
            .create(tag, overrides.as_object(), &mut ids)
            .unwrap();
        let location = Location::new(block.id(), &BlockLocation::TopLevel { index: 0 });
        BlockValidationRule.check_block(&block, &location)
    }

    #[test]
    fn test_reports_relative_button_url() {
        let diagnostics = check("button", json!({ "url": "/signup" }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "block-validation");
        assert_eq!(diagnostics[0].message, "URL must start with http:// or https://");
    }

    #[test]
    fn test_valid_blocks_pass() {
        assert!(check("text", json!({})).is_empty());
        assert!(check("columns", json!({})).is_empty());
    }
}

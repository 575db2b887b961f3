use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use mailblocks_blocks::{Block, BlockConfig};

/// Accessibility: images need alternative text, which is also what clients show while
/// images are blocked
pub struct ImageAltRule;

impl LintRule for ImageAltRule {
    fn name(&self) -> &'static str {
        "image-alt"
    }

    fn description(&self) -> &'static str {
        "Images must have alternative text"
    }

    fn check_block(&self, block: &Block, location: &Location) -> Vec<Diagnostic> {
        let alt = match block.config() {
            BlockConfig::Image(config) => &config.alt,
            BlockConfig::Article(config) => &config.image.alt,
            _ => return Vec::new(),
        };

        if !alt.trim().is_empty() {
            return Vec::new();
        }

        vec![Diagnostic::warning(
            self.name(),
            "Images must have alternative text for screen readers",
            location.clone(),
        )
        .with_suggestion("Set the alt text to describe the image content")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_blocks::{BlockLocation, BlockType, ConfigPatch};
    use serde_json::json;

    fn with_patch(kind: BlockType, patch: serde_json::Value) -> Block {
        let mut block = Block::new("img", kind.default_config());
        let patch: ConfigPatch = patch.as_object().cloned().unwrap();
        block.update_config(&patch).unwrap();
        block
    }

    fn location() -> Location {
        Location::new(
            "img",
            &BlockLocation::Nested {
                container_id: "cols",
                column_index: 1,
                index: 0,
            },
        )
    }

    #[test]
    fn test_empty_alt_on_image() {
        let block = with_patch(BlockType::Image, json!({ "alt": "  " }));
        let diagnostics = ImageAltRule.check_block(&block, &location());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.container_id.as_deref(), Some("cols"));
        assert_eq!(diagnostics[0].location.column_index, Some(1));
    }

    #[test]
    fn test_empty_alt_on_article_image() {
        let block = with_patch(BlockType::Article, json!({ "image.alt": "" }));
        assert_eq!(ImageAltRule.check_block(&block, &location()).len(), 1);
    }

    #[test]
    fn test_default_alt_passes() {
        let block = Block::new("img", BlockType::Image.default_config());
        assert!(ImageAltRule.check_block(&block, &location()).is_empty());
    }
}

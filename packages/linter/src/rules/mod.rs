mod block_validation;
mod email_compat;
mod image_alt;

pub use block_validation::BlockValidationRule;
pub use email_compat::EmailCompatRule;
pub use image_alt::ImageAltRule;

use crate::diagnostic::{Diagnostic, Location};
use mailblocks_blocks::Block;
use std::fmt;

/// A check run against every block in the document
pub trait LintRule {
    /// Identifier shown in diagnostics, e.g. `image-alt`
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Check one block. Nested blocks are visited separately, so a rule only looks at the
    /// block it is given.
    fn check_block(&self, block: &Block, location: &Location) -> Vec<Diagnostic>;
}

/// Ordered set of rules; diagnostics for one block come out in rule order
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Every built-in rule
    pub fn new() -> Self {
        Self::empty()
            .with_rule(BlockValidationRule)
            .with_rule(EmailCompatRule)
            .with_rule(ImageAltRule)
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Drop a rule by name; unknown names are ignored
    pub fn without(mut self, name: &str) -> Self {
        self.rules.retain(|rule| rule.name() != name);
        self
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

use crate::diagnostic::{Diagnostic, Location};
use crate::rules::LintRule;
use mailblocks_blocks::{email_warnings, sanitize_html, Block, BlockConfig, EmailWarning};

/// Flags custom HTML that email clients may not render
pub struct EmailCompatRule;

impl LintRule for EmailCompatRule {
    fn name(&self) -> &'static str {
        "email-compat"
    }

    fn description(&self) -> &'static str {
        "Custom HTML should avoid markup email clients do not support"
    }

    fn check_block(&self, block: &Block, location: &Location) -> Vec<Diagnostic> {
        let BlockConfig::Html(config) = block.config() else {
            return Vec::new();
        };

        email_warnings(&sanitize_html(&config.html))
            .into_iter()
            .map(|warning| {
                Diagnostic::warning(self.name(), warning.message(), location.clone())
                    .with_suggestion(suggestion(warning))
            })
            .collect()
    }
}

fn suggestion(warning: EmailWarning) -> &'static str {
    match warning {
        EmailWarning::MediaTag => "Replace media with a linked image",
        EmailWarning::FlexGrid => "Use a 2 or 3 column block for side-by-side layout",
        EmailWarning::StyleBlock => "Move the rules into style attributes",
        EmailWarning::Positioning => "Remove positioning and let content flow",
    }
}

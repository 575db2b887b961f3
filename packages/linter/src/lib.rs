mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel, Location};
pub use linter::{lint_document, LintOptions};
pub use rules::{BlockValidationRule, EmailCompatRule, ImageAltRule, LintRule, RuleRegistry};

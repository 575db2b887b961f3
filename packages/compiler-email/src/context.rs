use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the email body table, in pixels
pub const EMAIL_WIDTH: u32 = 600;

/// Errors that can occur during email compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Block {id} is invalid: {}", .errors.join(", "))]
    InvalidBlock { id: String, errors: Vec<String> },
}

/// Options for email compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Document `<title>`
    pub title: String,
    /// `lang` attribute of the root element
    pub lang: String,
    /// Pretty print markup
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Fail on blocks that do not pass validation
    pub strict: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            title: "Email".to_string(),
            lang: "en".to_string(),
            pretty: true,
            indent: "  ".to_string(),
            strict: false,
        }
    }
}

pub(crate) struct Context<'a> {
    pub options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}

use mailblocks_compiler_email::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailblocks.config.json";

/// Mailblocks configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source directory containing .json templates
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Output directory for compiled templates
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Email document options
    #[serde(default)]
    pub email: EmailConfig,
}

fn default_src_dir() -> String {
    "templates".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfig {
    /// Document title; each template's file name when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub lang: String,
    pub pretty: bool,
    /// Refuse to compile templates with invalid blocks
    pub strict: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        let defaults = CompileOptions::default();
        Self {
            title: None,
            lang: defaults.lang,
            pretty: defaults.pretty,
            strict: defaults.strict,
        }
    }
}

impl EmailConfig {
    pub fn compile_options(&self, template_name: &str) -> CompileOptions {
        CompileOptions {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| template_name.to_string()),
            lang: self.lang.clone(),
            pretty: self.pretty,
            strict: self.strict,
            ..CompileOptions::default()
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            email: EmailConfig::default(),
        }
    }
}

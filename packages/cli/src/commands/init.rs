use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailblocks_editor::{Document, Mutation};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "templates")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Mailblocks project...".bright_blue().bold()
    );

    // Create source directory if it doesn't exist
    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("welcome.json");
    if !example_file.exists() {
        fs::write(&example_file, sample_template()?)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        ..Config::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.src_dir);
    println!("  2. Run: mailblocks compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// A short welcome email built through the same mutations the editor uses
fn sample_template() -> Result<String> {
    let mut doc = Document::new("welcome");

    let insert = |block_type: &str, overrides: serde_json::Value| Mutation::InsertTop {
        block_type: block_type.to_string(),
        index: None,
        overrides: overrides.as_object().cloned(),
    };

    doc.apply(insert(
        "text",
        json!({ "text": "Welcome aboard!", "fontSize": 28, "fontWeight": "bold", "align": "center" }),
    ))?;
    doc.apply(insert("image", json!({ "alt": "Welcome banner" })))?;
    doc.apply(insert(
        "text",
        json!({ "text": "Thanks for signing up. Here is what you can do next." }),
    ))?;
    doc.apply(insert("columns", json!({})))?;

    let container = doc
        .blocks()
        .last()
        .map(|block| block.id().to_string())
        .unwrap_or_default();
    for (column, text) in ["Build your first email", "Invite your team"].iter().enumerate() {
        doc.apply(Mutation::AddToColumn {
            container_id: container.clone(),
            column_index: column,
            block_type: "text".to_string(),
            index: None,
            overrides: json!({ "text": text }).as_object().cloned(),
        })?;
    }

    doc.apply(insert(
        "button",
        json!({ "text": "Get started", "url": "https://example.com/start" }),
    ))?;

    Ok(doc.to_json_pretty()?)
}

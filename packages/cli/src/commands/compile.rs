use crate::commands::find_templates;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use mailblocks_editor::Document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Standalone email HTML document
    Email,
    /// Editor canvas markup
    Editor,
    /// Normalized block JSON
    Json,
}

impl Target {
    fn extension(self) -> &'static str {
        match self {
            Target::Email => "html",
            Target::Editor => "editor.html",
            Target::Json => "json",
        }
    }
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Directory to compile (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Target format
    #[arg(short, long, value_enum, default_value_t = Target::Email)]
    pub target: Target,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let project = PathBuf::from(cwd).join(&args.path);
    let project = project.display().to_string();
    let config = Config::load(&project)?;
    let src_dir = config.get_src_dir(&project);

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    println!("{}", "🔨 Compiling templates...".bright_blue().bold());

    let templates = find_templates(&src_dir)?;

    if templates.is_empty() {
        println!("{}", "⚠️  No .json templates found".yellow());
        return Ok(());
    }

    println!("Found {} files", templates.len());

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(&project).join(out),
        None => config.get_out_dir(&project),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for template in &templates {
        let relative_path = template.strip_prefix(&src_dir).unwrap_or(template);
        match compile_file(template, relative_path, &args, &config, &out_dir) {
            Ok(output_path) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_path
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} files successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Compiled {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    args: &CompileArgs,
    config: &Config,
    out_dir: &Path,
) -> Result<String> {
    let source = fs::read_to_string(file_path)?;
    let name = file_path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("email");

    let mut doc = Document::from_json(name, &source)?;
    doc.compile_options = config.email.compile_options(name);
    debug!(file = %file_path.display(), blocks = doc.blocks().len(), "loaded template");

    let output = match args.target {
        Target::Email => doc.generate_html()?,
        Target::Editor => doc.render(),
        Target::Json => doc.to_json_pretty()?,
    };

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir
        .join(relative_path)
        .with_extension(args.target.extension());

    // Create output directory
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&output_file, output)?;

    Ok(output_file.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};

    fn project() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        init(
            InitArgs {
                src_dir: "templates".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();
        (dir, cwd)
    }

    fn args(target: Target) -> CompileArgs {
        CompileArgs {
            path: ".".to_string(),
            target,
            stdout: false,
            out_dir: None,
        }
    }

    #[test]
    fn test_compile_email() {
        let (dir, cwd) = project();
        compile(args(Target::Email), &cwd).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/welcome.html")).unwrap();
        assert!(html.contains("<title>welcome</title>"));
        assert!(html.contains("Get started"));
    }

    #[test]
    fn test_compile_editor_and_json() {
        let (dir, cwd) = project();
        compile(args(Target::Editor), &cwd).unwrap();
        compile(args(Target::Json), &cwd).unwrap();

        let canvas = fs::read_to_string(dir.path().join("dist/welcome.editor.html")).unwrap();
        assert!(canvas.contains("columns-container"));

        let json = fs::read_to_string(dir.path().join("dist/welcome.json")).unwrap();
        let original = fs::read_to_string(dir.path().join("templates/welcome.json")).unwrap();
        assert_eq!(json, original);
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        assert!(compile(args(Target::Email), &cwd).is_err());
    }
}

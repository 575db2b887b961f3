use crate::commands::find_templates;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use mailblocks_blocks::{BlockRegistry, IdGenerator};
use mailblocks_linter::{lint_document, Diagnostic, DiagnosticLevel, LintOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Input .json template or directory to lint
    pub input: PathBuf,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Totals {
    diagnostics: usize,
    errors: usize,
    warnings: usize,
    files: usize,
}

impl Totals {
    fn add(&mut self, other: Totals) {
        self.diagnostics += other.diagnostics;
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.files += other.files;
    }
}

pub fn lint(args: LintArgs, cwd: &str) -> Result<()> {
    let input = PathBuf::from(cwd).join(&args.input);

    println!("🔍 {} Mailblocks Linter", "Starting".green().bold());
    println!("   Input: {}", args.input.display());
    println!();

    let totals = lint_path(&input, args.verbose, args.format)?;

    println!();
    println!(
        "✨ {} Linting complete!",
        if totals.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", totals.files);
    println!("   Total diagnostics: {}", totals.diagnostics);

    if totals.errors > 0 {
        println!("   {} {}", "Errors:".red(), totals.errors);
    }
    if totals.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), totals.warnings);
    }

    if totals.errors == 0 && totals.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }

    // Exit with error code if there are errors
    if totals.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn lint_path(input: &Path, verbose: bool, format: OutputFormat) -> Result<Totals> {
    let mut totals = Totals::default();

    if input.is_file() {
        totals.add(lint_file(input, verbose, format)?);
    } else if input.is_dir() {
        let templates = find_templates(input)?;
        println!("   Found {} .json templates", templates.len());
        println!();

        for file in templates {
            totals.add(lint_file(&file, verbose, format)?);
        }
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    }

    Ok(totals)
}

fn lint_file(file_path: &Path, verbose: bool, format: OutputFormat) -> Result<Totals> {
    let source = fs::read_to_string(file_path)?;
    let mut ids = IdGenerator::new(&file_path.to_string_lossy());

    let blocks = match BlockRegistry::with_builtins().load_list(&source, &mut ids) {
        Ok(blocks) => blocks,
        Err(err) => {
            eprintln!(
                "{} Failed to load {}: {}",
                "✗".red(),
                file_path.display(),
                err
            );
            return Ok(Totals {
                errors: 1,
                files: 1,
                ..Totals::default()
            });
        }
    };

    let diagnostics = lint_document(&blocks, LintOptions::default());
    let totals = count(&diagnostics);

    if diagnostics.is_empty() {
        if verbose {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return Ok(totals);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", file_path.display());

            for diagnostic in &diagnostics {
                if !verbose && diagnostic.level == DiagnosticLevel::Info {
                    continue;
                }
                print_diagnostic(diagnostic);
            }

            println!();
        }
    }

    Ok(totals)
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let level_str = match diagnostic.level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
        DiagnosticLevel::Info => "info".blue().bold(),
    };

    println!(
        "  {} [{}] {} {}",
        level_str,
        diagnostic.rule,
        diagnostic.message,
        format!("at {}", diagnostic.location).dimmed()
    );

    if let Some(suggestion) = &diagnostic.suggestion {
        println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
    }
}

fn count(diagnostics: &[Diagnostic]) -> Totals {
    let errors = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .count();

    Totals {
        diagnostics: diagnostics.len(),
        errors,
        warnings,
        files: 1,
    }
}

pub mod compile;
pub mod init;
pub mod lint;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every `.json` template under `dir`, in a stable order
pub(crate) fn find_templates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

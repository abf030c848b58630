//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use valentine::{LetterRecord, LetterStore};

/// Resolve text that may be given inline, from a file, or (`-`) from stdin.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<Option<String>> {
    if let Some(t) = text {
        return Ok(Some(t));
    }
    match from {
        Some(path) if path.as_os_str() == "-" => read_stdin().map(Some),
        Some(path) => fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("failed to read {}", path.display())),
        None => Ok(None),
    }
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Open the letter store, attaching path context to any error.
pub fn load_store(path: &Path) -> Result<LetterStore> {
    LetterStore::open(path)
        .with_context(|| format!("failed to read letter store {}", path.display()))
}

/// Look up a letter or fail with a readable message.
pub fn find_letter<'a>(store: &'a LetterStore, id: &str) -> Result<&'a LetterRecord> {
    store
        .get(id)
        .ok_or_else(|| anyhow!("no letter with id '{}'", id))
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}

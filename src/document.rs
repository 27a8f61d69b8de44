//! Writing a finished summary into a markdown note

use anyhow::{Context, Result};
use std::path::Path;

/// Where the summary block goes in the note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Append after the existing content
    End,
    /// Insert before this 1-based line; past the end means append
    Line(usize),
}

impl InsertPosition {
    pub fn from_line(line: Option<usize>) -> Self {
        match line {
            Some(n) => Self::Line(n.max(1)),
            None => Self::End,
        }
    }
}

/// Splice `block` into `content` at `position`, keeping line boundaries.
pub fn splice(content: &str, block: &str, position: InsertPosition) -> String {
    let offset = match position {
        InsertPosition::End => content.len(),
        InsertPosition::Line(line) if line <= 1 => 0,
        InsertPosition::Line(line) => content
            .match_indices('\n')
            .nth(line - 2)
            .map(|(i, _)| i + 1)
            .unwrap_or(content.len()),
    };

    let mut out = String::with_capacity(content.len() + block.len() + 2);
    out.push_str(&content[..offset]);
    if offset > 0 && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(block);
    if offset < content.len() && !block.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&content[offset..]);
    out
}

/// Insert `block` into the note at `path`, creating the note if needed.
pub fn insert_into_note(path: &Path, block: &str, position: InsertPosition) -> Result<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read note: {}", path.display()))?
    } else {
        String::new()
    };

    let updated = splice(&content, block, position);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, updated)
        .with_context(|| format!("Failed to write note: {}", path.display()))?;

    tracing::info!("Inserted summary into {}", path.display());
    Ok(())
}

//! Checks on file paths given on the command line

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Resolve a contact file path given by the user
///
/// The file must exist and be a regular file. A missing `.csv` extension
/// only produces a warning.
pub fn resolve_contact_file(path: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot access contact file {}", path.display()))?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        warn!(
            "{} does not have a .csv extension; reading it as CSV anyway",
            path.display()
        );
    }

    path.canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))
}

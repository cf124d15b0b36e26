//! Loading a pre-built path list from a plaintext file.

use std::fs;
use std::path::{Path, PathBuf};

use super::EnumerationError;

/// Load newline-separated paths from `list_path`.
///
/// Lines that do not look like file paths are dropped: a line is kept only
/// when it contains a `.` somewhere past its first character, which filters
/// out directory lines and decoration from tools that emit tree-style
/// listings.
pub fn load_file_list(list_path: &Path) -> Result<Vec<PathBuf>, EnumerationError> {
    let content = fs::read_to_string(list_path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            EnumerationError::NotFound(list_path.to_path_buf())
        } else {
            EnumerationError::Io {
                path: list_path.to_path_buf(),
                source,
            }
        }
    })?;

    let files: Vec<PathBuf> = content
        .lines()
        .map(str::trim_end)
        .filter(|line| looks_like_file(line))
        .map(PathBuf::from)
        .collect();

    log::debug!("Loaded {} paths from {}", files.len(), list_path.display());
    Ok(files)
}

/// A line is a file candidate when a `.` appears after its first character.
fn looks_like_file(line: &str) -> bool {
    line.chars().skip(1).any(|c| c == '.')
}

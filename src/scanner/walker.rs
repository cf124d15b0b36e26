//! Directory traversal with `walkdir`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::EnumerationError;

/// Recursively collect every file under `root`.
///
/// Symlinks are not followed. Entries that cannot be read (permissions,
/// races with deletion) are logged and skipped; only an unreadable root is
/// fatal. Order is whatever the filesystem yields; the scan does not depend
/// on it.
pub fn build_file_list(root: &Path) -> Result<Vec<PathBuf>, EnumerationError> {
    if !root.exists() {
        return Err(EnumerationError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(EnumerationError::NotADirectory(root.to_path_buf()));
    }

    log::info!("Building a list of file paths under {}", root.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
            }
        }
    }

    log::debug!("Found {} files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_walk_collects_nested_files() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("season1");
        fs::create_dir(&sub).unwrap();
        File::create(dir.path().join("a.mkv")).unwrap();
        File::create(sub.join("b.mkv")).unwrap();

        let mut files = build_file_list(dir.path()).unwrap();
        files.sort();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.mkv"));
        assert!(files[1].ends_with("b.mkv"));
    }

    #[test]
    fn test_walk_skips_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let files = build_file_list(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = build_file_list(Path::new("/no/such/root")).unwrap_err();
        assert!(matches!(err, EnumerationError::NotFound(_)));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        File::create(&file).unwrap();

        let err = build_file_list(&file).unwrap_err();
        assert!(matches!(err, EnumerationError::NotADirectory(_)));
    }
}

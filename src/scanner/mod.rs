//! File enumeration: building the list of paths to scan.
//!
//! Two sources, one output shape:
//! - [`walker`]: recursive directory traversal with `walkdir`
//! - [`filelist`]: a pre-built plaintext list, one path per line
//!
//! Enumeration is the only fatal surface in the application: a root that
//! cannot be read at all aborts the run, while individual unreadable entries
//! are logged and skipped.

pub mod filelist;
pub mod walker;

use std::path::PathBuf;

pub use filelist::load_file_list;
pub use walker::build_file_list;

/// Errors that can occur while building the scan list.
#[derive(thiserror::Error, Debug)]
pub enum EnumerationError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while reading a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

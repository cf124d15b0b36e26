//! Filename classification: turning a path into structured media metadata.
//!
//! The duplicate engine does not inspect file contents. Everything it knows
//! about a file comes from a [`MediaRecord`] produced by a [`Classifier`]
//! implementation, normally the regex-based [`FilenameClassifier`].
//!
//! A classifier may legitimately fail to make sense of a name; that is
//! reported as `Ok(None)` (nothing parsable) or `Err(_)` (internal fault).
//! Both are treated identically downstream: the file lands in the
//! unprocessed bucket and the scan continues.

pub mod filename;

use std::path::Path;

pub use filename::FilenameClassifier;

/// Structured metadata for a single file, as parsed from its name.
///
/// Immutable once produced; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    /// Evidence that this file is video content at all.
    pub video_hint: VideoHint,
    /// What kind of media the name describes.
    pub kind: MediaKind,
}

/// Evidence used by the video gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoHint {
    /// True when the extension maps to a `video/*` mimetype or the name
    /// carries a recognizable video codec token (x264, HEVC, ...).
    pub mimetype_or_codec: bool,
    /// Container extension, lowercased, when the file has one.
    pub container: Option<String>,
}

/// The media kinds the engine models.
///
/// Anything else the classifier encounters is `Other` and will be rejected
/// by key derivation with an unknown-kind reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    /// A TV episode. Identity needs a disambiguator: season/episode pair,
    /// air date, or part number.
    Episode {
        title: String,
        alternative_title: Option<String>,
        season: Option<u32>,
        episode: Option<u32>,
        /// Air date in its literal printed form (e.g. `2020-01-01`).
        date: Option<String>,
        part: Option<String>,
        country: Option<String>,
        year: Option<i32>,
        edition: Option<String>,
    },
    /// A movie. `other` carries free-form flags; `"Trailer"` excludes the
    /// file from deduplication entirely.
    Movie {
        title: String,
        year: Option<i32>,
        cd: Option<u32>,
        other: Option<String>,
    },
    /// Parsed, but not a kind the engine knows how to identify.
    Other,
}

impl MediaKind {
    /// Short label used in logs and counters.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Episode { .. } => "episode",
            MediaKind::Movie { .. } => "movie",
            MediaKind::Other => "other",
        }
    }
}

/// Errors raised inside a classifier implementation.
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    /// The path had no usable file name component.
    #[error("path has no file name: {0}")]
    NoFileName(std::path::PathBuf),
}

/// Maps a file path to an optional structured metadata record.
///
/// Implementations must be cheap and deterministic: the scan retries
/// nothing, and the same path must always produce the same record.
pub trait Classifier: Send + Sync {
    /// Classify a single path.
    ///
    /// Returns `Ok(None)` when the name is not parsable at all.
    fn classify_path(&self, path: &Path) -> Result<Option<MediaRecord>, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_labels() {
        let movie = MediaKind::Movie {
            title: "Foo".to_string(),
            year: None,
            cd: None,
            other: None,
        };
        assert_eq!(movie.label(), "movie");
        assert_eq!(MediaKind::Other.label(), "other");
    }

    #[test]
    fn test_video_hint_default() {
        let hint = VideoHint::default();
        assert!(!hint.mimetype_or_codec);
        assert!(hint.container.is_none());
    }
}

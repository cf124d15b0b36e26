//! Classification partitioning.
//!
//! Drives one file through the video gate, key derivation, identity hashing
//! and the aggregation table, and files the outcome into exactly one of four
//! buckets: first-seen, duplicate, unprocessed, or skipped non-video.
//!
//! All accumulator state lives in a [`ScanContext`] owned by the scan driver
//! for the duration of one scan; there are no process-wide singletons.
//! Buckets are mutex-guarded vectors and counters are atomics, so workers
//! can partition files concurrently without lost updates.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

use crate::classifier::{ClassifierError, MediaKind, MediaRecord};

use super::identity::{identity_hash, IdentityHash};
use super::key::{derive, passes_video_gate, Rejection};
use super::table::{AggregationTable, InsertOutcome};

/// A file that mapped to an already-occupied identity slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    /// The incoming file.
    pub file: PathBuf,
    /// The table's first-seen representative for this identity.
    pub representative: PathBuf,
    /// The shared content identity.
    pub hash: IdentityHash,
}

/// Which bucket a file landed in. Returned for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    FirstSeen,
    Duplicate,
    Unprocessed,
    SkippedNonVideo,
}

/// Result buckets accumulated across a scan.
///
/// Disjoint and exhaustive: every submitted file lands in exactly one.
#[derive(Debug, Default)]
pub struct ScanResults {
    first_seen: Mutex<Vec<PathBuf>>,
    duplicates: Mutex<Vec<DuplicatePair>>,
    unprocessed: Mutex<Vec<(PathBuf, Rejection)>>,
    skipped_non_video: Mutex<Vec<PathBuf>>,
}

/// Per-outcome counters, updated once per file.
#[derive(Debug, Default)]
pub struct ScanStats {
    videos: AtomicUsize,
    movies: AtomicUsize,
    episodes: AtomicUsize,
    duplicates: AtomicUsize,
    unprocessed: AtomicUsize,
    non_videos: AtomicUsize,
}

/// Shared accumulator state for one scan.
///
/// Created empty by the scan driver, threaded through every partition call,
/// then torn down into a [`ScanOutcome`].
#[derive(Debug, Default)]
pub struct ScanContext {
    /// Identity-to-representative table.
    pub table: AggregationTable,
    results: ScanResults,
    stats: ScanStats,
}

impl ScanContext {
    /// Create a fresh context with an empty table and empty buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear the context down into plain, single-threaded results.
    #[must_use]
    pub fn into_outcome(self, files_checked: usize, duration: Duration, interrupted: bool) -> ScanOutcome {
        let summary = Summary {
            files_checked,
            videos: self.stats.videos.load(Ordering::SeqCst),
            movies: self.stats.movies.load(Ordering::SeqCst),
            episodes: self.stats.episodes.load(Ordering::SeqCst),
            duplicates: self.stats.duplicates.load(Ordering::SeqCst),
            unprocessed: self.stats.unprocessed.load(Ordering::SeqCst),
            non_videos: self.stats.non_videos.load(Ordering::SeqCst),
            duration_ms: duration.as_millis() as u64,
            interrupted,
        };
        ScanOutcome {
            first_seen: self.results.first_seen.into_inner().unwrap(),
            duplicates: self.results.duplicates.into_inner().unwrap(),
            unprocessed: self.results.unprocessed.into_inner().unwrap(),
            skipped_non_video: self.results.skipped_non_video.into_inner().unwrap(),
            summary,
        }
    }
}

/// Final, unsynchronized scan results handed to the report sink.
#[derive(Debug)]
pub struct ScanOutcome {
    /// First file seen for each distinct identity.
    pub first_seen: Vec<PathBuf>,
    /// Files that mapped to an already-seen identity.
    pub duplicates: Vec<DuplicatePair>,
    /// Files that could not be classified, with the reason.
    pub unprocessed: Vec<(PathBuf, Rejection)>,
    /// Files that failed the video gate.
    pub skipped_non_video: Vec<PathBuf>,
    /// Summary counters.
    pub summary: Summary,
}

/// Summary counters for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total files submitted to the partitioner.
    pub files_checked: usize,
    /// Files that passed the video gate.
    pub videos: usize,
    /// Distinct movies (first-seen only).
    pub movies: usize,
    /// Distinct episodes (first-seen only).
    pub episodes: usize,
    /// Files recorded as duplicates.
    pub duplicates: usize,
    /// Files recorded as unprocessed.
    pub unprocessed: usize,
    /// Files skipped as non-video.
    pub non_videos: usize,
    /// Scan duration in milliseconds.
    pub duration_ms: u64,
    /// Whether the scan was cut short by a shutdown request.
    pub interrupted: bool,
}

/// Partition one file given the classifier's verdict.
///
/// Never fails: every fault is terminal for this file only and is recorded
/// in a bucket. Returns the bucket for logging.
pub fn classify_file(
    path: &Path,
    record: Result<Option<MediaRecord>, ClassifierError>,
    ctx: &ScanContext,
) -> Bucket {
    let record = match record {
        Ok(Some(record)) => record,
        Ok(None) => {
            log::debug!("Classifier produced nothing for: {}", path.display());
            return record_unprocessed(ctx, path, Rejection::ClassifierFailure);
        }
        Err(err) => {
            log::debug!("Classifier fault for {}: {}", path.display(), err);
            return record_unprocessed(ctx, path, Rejection::ClassifierFailure);
        }
    };

    if !passes_video_gate(&record) {
        ctx.stats.non_videos.fetch_add(1, Ordering::SeqCst);
        ctx.results
            .skipped_non_video
            .lock()
            .unwrap()
            .push(path.to_path_buf());
        return Bucket::SkippedNonVideo;
    }
    ctx.stats.videos.fetch_add(1, Ordering::SeqCst);

    let key = match derive(&record) {
        Ok(key) => key,
        Err(rejection) => {
            log::debug!("Not sure how to process {}: {}", path.display(), rejection);
            return record_unprocessed(ctx, path, rejection);
        }
    };

    let hash = identity_hash(&key);
    match ctx.table.try_insert(hash, path) {
        InsertOutcome::FirstSeen => {
            match record.kind {
                MediaKind::Movie { .. } => {
                    ctx.stats.movies.fetch_add(1, Ordering::SeqCst);
                }
                MediaKind::Episode { .. } => {
                    ctx.stats.episodes.fetch_add(1, Ordering::SeqCst);
                }
                // Unreachable after derive(), kept exhaustive.
                MediaKind::Other => {}
            }
            ctx.results
                .first_seen
                .lock()
                .unwrap()
                .push(path.to_path_buf());
            Bucket::FirstSeen
        }
        InsertOutcome::AlreadyPresent(representative) => {
            log::info!(
                "Duplicate found: {} (first seen: {})",
                path.display(),
                representative.display()
            );
            ctx.stats.duplicates.fetch_add(1, Ordering::SeqCst);
            ctx.results.duplicates.lock().unwrap().push(DuplicatePair {
                file: path.to_path_buf(),
                representative,
                hash,
            });
            Bucket::Duplicate
        }
    }
}

fn record_unprocessed(ctx: &ScanContext, path: &Path, reason: Rejection) -> Bucket {
    ctx.stats.unprocessed.fetch_add(1, Ordering::SeqCst);
    ctx.results
        .unprocessed
        .lock()
        .unwrap()
        .push((path.to_path_buf(), reason));
    Bucket::Unprocessed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::VideoHint;
    use std::time::Duration;

    fn movie(title: &str) -> MediaRecord {
        MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: true,
                container: Some("mkv".to_string()),
            },
            kind: MediaKind::Movie {
                title: title.to_string(),
                year: Some(2020),
                cd: None,
                other: None,
            },
        }
    }

    fn non_video() -> MediaRecord {
        MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: false,
                container: Some("txt".to_string()),
            },
            kind: MediaKind::Other,
        }
    }

    #[test]
    fn test_first_seen_then_duplicate() {
        let ctx = ScanContext::new();
        assert_eq!(
            classify_file(Path::new("/a.mkv"), Ok(Some(movie("Foo"))), &ctx),
            Bucket::FirstSeen
        );
        assert_eq!(
            classify_file(Path::new("/b.mkv"), Ok(Some(movie("Foo"))), &ctx),
            Bucket::Duplicate
        );

        let outcome = ctx.into_outcome(2, Duration::ZERO, false);
        assert_eq!(outcome.first_seen, vec![PathBuf::from("/a.mkv")]);
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.duplicates[0].file, PathBuf::from("/b.mkv"));
        assert_eq!(outcome.duplicates[0].representative, PathBuf::from("/a.mkv"));
        assert_eq!(outcome.summary.movies, 1);
        assert_eq!(outcome.summary.duplicates, 1);
        assert_eq!(outcome.summary.videos, 2);
    }

    #[test]
    fn test_classifier_none_is_unprocessed() {
        let ctx = ScanContext::new();
        assert_eq!(
            classify_file(Path::new("/x"), Ok(None), &ctx),
            Bucket::Unprocessed
        );
        let outcome = ctx.into_outcome(1, Duration::ZERO, false);
        assert_eq!(
            outcome.unprocessed,
            vec![(PathBuf::from("/x"), Rejection::ClassifierFailure)]
        );
    }

    #[test]
    fn test_non_video_is_skipped_not_unprocessed() {
        let ctx = ScanContext::new();
        assert_eq!(
            classify_file(Path::new("/notes.txt"), Ok(Some(non_video())), &ctx),
            Bucket::SkippedNonVideo
        );
        let outcome = ctx.into_outcome(1, Duration::ZERO, false);
        assert_eq!(outcome.skipped_non_video, vec![PathBuf::from("/notes.txt")]);
        assert!(outcome.unprocessed.is_empty());
        assert_eq!(outcome.summary.non_videos, 1);
        assert_eq!(outcome.summary.videos, 0);
    }

    #[test]
    fn test_trailer_never_occupies_a_slot() {
        let ctx = ScanContext::new();
        let trailer = MediaRecord {
            video_hint: VideoHint {
                mimetype_or_codec: true,
                container: None,
            },
            kind: MediaKind::Movie {
                title: "Foo".to_string(),
                year: Some(2020),
                cd: None,
                other: Some("Trailer".to_string()),
            },
        };

        // Two trailers for the same title: both unprocessed, never paired.
        assert_eq!(
            classify_file(Path::new("/t1.mp4"), Ok(Some(trailer.clone())), &ctx),
            Bucket::Unprocessed
        );
        assert_eq!(
            classify_file(Path::new("/t2.mp4"), Ok(Some(trailer)), &ctx),
            Bucket::Unprocessed
        );

        assert!(ctx.table.is_empty());
        let outcome = ctx.into_outcome(2, Duration::ZERO, false);
        assert!(outcome.duplicates.is_empty());
        assert!(outcome.first_seen.is_empty());
        assert_eq!(outcome.unprocessed.len(), 2);
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let ctx = ScanContext::new();
        classify_file(Path::new("/a.mkv"), Ok(Some(movie("Foo"))), &ctx);
        classify_file(Path::new("/b.mkv"), Ok(Some(movie("Foo"))), &ctx);
        classify_file(Path::new("/c.txt"), Ok(Some(non_video())), &ctx);
        classify_file(Path::new("/d"), Ok(None), &ctx);

        let outcome = ctx.into_outcome(4, Duration::ZERO, false);
        let total = outcome.first_seen.len()
            + outcome.duplicates.len()
            + outcome.unprocessed.len()
            + outcome.skipped_non_video.len();
        assert_eq!(total, 4);
    }
}

//! Scan driver: a fixed-size worker pool draining the file list.
//!
//! Files are classified independently; the only ordering between them is the
//! aggregation table's insert serialization. Workers poll the shutdown flag
//! once per file, so Ctrl+C produces a partial-but-consistent outcome rather
//! than a torn one.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::progress::ProgressCallback;

use super::partition::{classify_file, ScanContext, ScanOutcome};

/// Configuration for one scan.
pub struct ScanConfig {
    /// Worker pool size. Defaults to available hardware parallelism.
    pub workers: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanConfig")
            .field("workers", &self.workers)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl ScanConfig {
    /// Set the worker pool size (clamped to at least 1).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Default worker count: available hardware parallelism.
#[must_use]
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Classify every path in `files` and aggregate the outcomes.
///
/// Each file is driven through the classifier and the partitioner on a
/// rayon pool of `config.workers` threads. One file's failure never aborts
/// the scan. Which of several concurrently-racing duplicates ends up
/// first-seen is unspecified unless `workers == 1`.
pub fn scan<C: Classifier>(files: &[PathBuf], classifier: &C, config: &ScanConfig) -> ScanOutcome {
    let start = Instant::now();
    let ctx = ScanContext::new();
    let interrupted = AtomicBool::new(false);
    let processed = AtomicUsize::new(0);

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_start("classify", files.len());
    }

    log::info!(
        "Checking {} files for duplicate movies / tv episodes on {} workers",
        files.len(),
        config.workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build scan pool ({e}), using global pool");
            rayon::ThreadPoolBuilder::new().build().unwrap()
        });

    pool.install(|| {
        files.par_iter().for_each(|path| {
            if config.is_shutdown_requested() {
                interrupted.store(true, Ordering::SeqCst);
                return;
            }

            let record = classifier.classify_path(path);
            classify_file(path, record, &ctx);

            let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(ref callback) = config.progress_callback {
                callback.on_progress(done, path.to_string_lossy().as_ref());
            }
        });
    });

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end("classify");
    }

    let interrupted = interrupted.load(Ordering::SeqCst);
    if interrupted {
        log::warn!("Scan interrupted; results are partial");
    }

    // Count only files actually submitted to the partitioner, so bucket
    // counts always sum to files_checked even on an interrupted scan.
    ctx.into_outcome(processed.load(Ordering::SeqCst), start.elapsed(), interrupted)
}

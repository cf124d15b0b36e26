//! JSON report formatter.
//!
//! Machine-readable rendering of the four result buckets and the summary
//! counters, with the keeper tie-break already applied to each pair.

use std::path::Path;

use serde::Serialize;

use crate::engine::{hash_to_hex, Rejection, ScanOutcome, Summary};

use super::report::ResolvedDuplicate;

/// One duplicate pair in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    /// The copy to keep (earlier modification time wins).
    pub keep: String,
    /// The redundant copy.
    pub discard: String,
    /// Content identity as lowercase hex.
    pub identity: String,
}

/// One unprocessed file in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonUnprocessed {
    pub file: String,
    pub reason: Rejection,
}

/// Complete scan report in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub summary: Summary,
    pub first_seen: Vec<String>,
    pub duplicates: Vec<JsonDuplicate>,
    pub unprocessed: Vec<JsonUnprocessed>,
    pub skipped_non_video: Vec<String>,
}

impl JsonReport {
    /// Build a report from a scan outcome and its resolved pairs.
    #[must_use]
    pub fn new(outcome: &ScanOutcome, resolved: &[ResolvedDuplicate]) -> Self {
        Self {
            summary: outcome.summary.clone(),
            first_seen: outcome.first_seen.iter().map(path_string).collect(),
            duplicates: resolved
                .iter()
                .map(|dup| JsonDuplicate {
                    keep: path_string(&dup.keep),
                    discard: path_string(&dup.discard),
                    identity: hash_to_hex(&dup.hash),
                })
                .collect(),
            unprocessed: outcome
                .unprocessed
                .iter()
                .map(|(file, reason)| JsonUnprocessed {
                    file: path_string(file),
                    reason: *reason,
                })
                .collect(),
            skipped_non_video: outcome.skipped_non_video.iter().map(path_string).collect(),
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn path_string<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().into_owned()
}

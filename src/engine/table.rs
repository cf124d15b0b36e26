//! Concurrent aggregation table.
//!
//! Maps content-identity hashes to the first file observed with each
//! identity. [`AggregationTable::try_insert`] is the one correctness-critical
//! critical section in the whole scan: a read-then-write race on the same
//! hash would let two files both believe they are first-seen. A single mutex
//! around the map serializes every insert, so exactly one caller per hash
//! observes [`InsertOutcome::FirstSeen`].
//!
//! "First" means first to acquire the lock, not any property of the file.
//! Under concurrency the winner among racing files is unspecified; the
//! report-time tie-break in [`crate::output::report`] is the place that
//! decides which file to present as the keeper.
//!
//! Entries are never removed or overwritten during a run; the table starts
//! empty and is discarded when the scan's results have been rendered.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::identity::IdentityHash;

/// Outcome of a [`AggregationTable::try_insert`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This caller won the slot; its file is the representative.
    FirstSeen,
    /// The slot was taken; carries the winner's path.
    AlreadyPresent(PathBuf),
}

/// Concurrent map from identity hash to representative file.
#[derive(Debug, Default)]
pub struct AggregationTable {
    entries: Mutex<HashMap<IdentityHash, PathBuf>>,
}

impl AggregationTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim the slot for `hash`.
    ///
    /// Exactly one caller across all threads observes `FirstSeen` for a
    /// given hash; every other caller gets `AlreadyPresent` with the
    /// winner's path.
    pub fn try_insert(&self, hash: IdentityHash, path: &Path) -> InsertOutcome {
        let mut entries = self.entries.lock().unwrap();
        match entries.entry(hash) {
            Entry::Occupied(slot) => InsertOutcome::AlreadyPresent(slot.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(path.to_path_buf());
                InsertOutcome::FirstSeen
            }
        }
    }

    /// Look up the representative for a hash, if any.
    #[must_use]
    pub fn representative(&self, hash: &IdentityHash) -> Option<PathBuf> {
        self.entries.lock().unwrap().get(hash).cloned()
    }

    /// Number of distinct identities seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

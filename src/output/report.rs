//! Report-time keeper resolution.
//!
//! The aggregation table's representative is whichever file won the insert
//! race; that is an aggregation decision, not a judgment about which copy
//! the user should keep. This module applies the reporting policy on top of
//! the recorded pairs: the member with the *earlier* modification time is
//! presented as the keeper. Aggregation semantics are untouched; the same
//! pair can name the representative as the discard.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::engine::{DuplicatePair, IdentityHash};

/// A duplicate pair with the keeper decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDuplicate {
    /// The copy presented as authoritative.
    pub keep: PathBuf,
    /// The copy presented as the duplicate.
    pub discard: PathBuf,
    /// The shared content identity.
    pub hash: IdentityHash,
}

/// Apply the mtime tie-break to every recorded pair.
///
/// When either side's modification time cannot be read, the table's
/// representative stays the keeper.
#[must_use]
pub fn resolve_keepers(pairs: &[DuplicatePair]) -> Vec<ResolvedDuplicate> {
    pairs.iter().map(resolve_pair).collect()
}

fn resolve_pair(pair: &DuplicatePair) -> ResolvedDuplicate {
    let keep_incoming = match (mtime(&pair.file), mtime(&pair.representative)) {
        (Some(file_mtime), Some(rep_mtime)) => file_mtime < rep_mtime,
        _ => false,
    };

    if keep_incoming {
        log::debug!(
            "Tie-break: {} is older than representative {}",
            pair.file.display(),
            pair.representative.display()
        );
        ResolvedDuplicate {
            keep: pair.file.clone(),
            discard: pair.representative.clone(),
            hash: pair.hash,
        }
    } else {
        ResolvedDuplicate {
            keep: pair.representative.clone(),
            discard: pair.file.clone(),
            hash: pair.hash,
        }
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::fs::File;
    use tempfile::tempdir;

    fn pair(file: &Path, representative: &Path) -> DuplicatePair {
        DuplicatePair {
            file: file.to_path_buf(),
            representative: representative.to_path_buf(),
            hash: [0u8; 32],
        }
    }

    #[test]
    fn test_earlier_mtime_becomes_keeper() {
        let dir = tempdir().unwrap();
        let rep = dir.path().join("a.mkv");
        let dup = dir.path().join("b.mkv");
        File::create(&rep).unwrap();
        File::create(&dup).unwrap();
        set_file_mtime(&rep, FileTime::from_unix_time(2_000, 0)).unwrap();
        set_file_mtime(&dup, FileTime::from_unix_time(1_000, 0)).unwrap();

        let resolved = resolve_keepers(&[pair(&dup, &rep)]);
        assert_eq!(resolved[0].keep, dup);
        assert_eq!(resolved[0].discard, rep);
    }

    #[test]
    fn test_representative_stays_keeper_when_older() {
        let dir = tempdir().unwrap();
        let rep = dir.path().join("a.mkv");
        let dup = dir.path().join("b.mkv");
        File::create(&rep).unwrap();
        File::create(&dup).unwrap();
        set_file_mtime(&rep, FileTime::from_unix_time(1_000, 0)).unwrap();
        set_file_mtime(&dup, FileTime::from_unix_time(2_000, 0)).unwrap();

        let resolved = resolve_keepers(&[pair(&dup, &rep)]);
        assert_eq!(resolved[0].keep, rep);
        assert_eq!(resolved[0].discard, dup);
    }

    #[test]
    fn test_unreadable_mtime_falls_back_to_representative() {
        let dir = tempdir().unwrap();
        let rep = dir.path().join("a.mkv");
        File::create(&rep).unwrap();
        let gone = dir.path().join("missing.mkv");

        let resolved = resolve_keepers(&[pair(&gone, &rep)]);
        assert_eq!(resolved[0].keep, rep);
        assert_eq!(resolved[0].discard, gone);
    }
}

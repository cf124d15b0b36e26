//! Console summary and plaintext list files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use yansi::Paint;

use crate::engine::{Rejection, Summary};

use super::report::ResolvedDuplicate;

/// Print the post-scan summary to stdout.
///
/// Movie and episode lines are printed only when non-zero, matching the
/// summary's focus on what was actually found.
pub fn print_summary(summary: &Summary) {
    println!(
        "Finished checking for duplicates, it took {:.1}s",
        summary.duration_ms as f64 / 1000.0
    );
    println!("Files checked: {}", summary.files_checked);
    println!("Videos checked: {}", summary.videos);
    println!("Skipped non videos: {}", summary.non_videos);
    println!("Unprocessed files: {}", summary.unprocessed);
    if summary.movies > 0 {
        println!("Movies: {}", summary.movies);
    }
    if summary.episodes > 0 {
        println!("Episodes: {}", summary.episodes);
    }
    let duplicates = if summary.duplicates > 0 {
        summary.duplicates.red().bold().to_string()
    } else {
        summary.duplicates.green().to_string()
    };
    println!("Duplicates: {duplicates}");
    if summary.interrupted {
        println!("{}", "Scan was interrupted; results are partial".yellow());
    }
}

/// Print the resolved duplicate pairs to stdout.
pub fn print_duplicates(resolved: &[ResolvedDuplicate]) {
    if resolved.is_empty() {
        return;
    }
    println!("\nDupes:");
    for dup in resolved {
        println!(
            "{} is a duplicate of {}",
            dup.discard.display().red(),
            dup.keep.display()
        );
    }
}

/// Save one path per line to `target`.
pub fn save_path_list(target: &Path, paths: &[PathBuf]) -> std::io::Result<usize> {
    let mut writer = BufWriter::new(File::create(target)?);
    for path in paths {
        writeln!(writer, "{}", path.display())?;
    }
    writer.flush()?;
    Ok(paths.len())
}

/// Save unprocessed entries with their rejection reasons.
pub fn save_unprocessed_list(
    target: &Path,
    entries: &[(PathBuf, Rejection)],
) -> std::io::Result<usize> {
    let mut writer = BufWriter::new(File::create(target)?);
    for (path, reason) in entries {
        writeln!(writer, "{}\t{}", path.display(), reason)?;
    }
    writer.flush()?;
    Ok(entries.len())
}

/// Save the discard side of each resolved duplicate, one per line.
pub fn save_dupes_list(target: &Path, resolved: &[ResolvedDuplicate]) -> std::io::Result<usize> {
    let mut writer = BufWriter::new(File::create(target)?);
    for dup in resolved {
        writeln!(writer, "{}", dup.discard.display())?;
    }
    writer.flush()?;
    Ok(resolved.len())
}

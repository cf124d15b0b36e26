//! videodupe - duplicate movie / TV-episode finder.
//!
//! Derives a content identity for each video file from its parsed filename
//! metadata and reports files that resolve to the same identity. The
//! [`engine`] module holds the identity pipeline; [`classifier`] and
//! [`scanner`] feed it; [`output`] renders what it found.

pub mod classifier;
pub mod cli;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::sync::Arc;

use anyhow::{Context, Result};

use classifier::FilenameClassifier;
use cli::{Cli, OutputFormat};
use engine::{default_workers, scan, ScanConfig};
use error::ExitCode;
use output::JsonReport;
use progress::Progress;

/// Run the application: enumerate, scan, render, and pick an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let handler = signal::install_handler()?;

    // Build the list of files to check.
    let files = if let Some(ref list) = cli.list {
        log::info!("Loading file paths from {}", list.display());
        scanner::load_file_list(list)
            .with_context(|| format!("failed to load path list {}", list.display()))?
    } else {
        let root = cli.path.as_ref().expect("clap enforces path or list");
        scanner::build_file_list(root)
            .with_context(|| format!("failed to scan {}", root.display()))?
    };

    // Scan.
    let workers = cli.workers.unwrap_or_else(default_workers);
    let show_progress = !cli.quiet && cli.output == OutputFormat::Text;
    let config = ScanConfig::default()
        .with_workers(workers)
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(Arc::new(Progress::new(!show_progress)));
    let outcome = scan(&files, &FilenameClassifier::new(), &config);

    // Reporting-layer keeper decision, separate from aggregation order.
    let resolved = output::resolve_keepers(&outcome.duplicates);

    match cli.output {
        OutputFormat::Text => {
            if !cli.quiet {
                output::text::print_summary(&outcome.summary);
                output::text::print_duplicates(&resolved);
            }
        }
        OutputFormat::Json => {
            let report = JsonReport::new(&outcome, &resolved);
            println!("{}", report.to_json_pretty()?);
        }
        OutputFormat::Csv => {
            output::csv::write_duplicates_csv(std::io::stdout().lock(), &resolved)?;
        }
    }

    if let Some(ref target) = cli.save_dupes {
        let wrote = output::text::save_dupes_list(target, &resolved)
            .with_context(|| format!("failed to save dupes to {}", target.display()))?;
        log::info!("Saved {} dupes to {}", wrote, target.display());
    }
    if let Some(ref target) = cli.save_skipped {
        let wrote = output::text::save_path_list(target, &outcome.skipped_non_video)
            .with_context(|| format!("failed to save skipped files to {}", target.display()))?;
        log::info!("Saved {} skipped files to {}", wrote, target.display());
    }
    if let Some(ref target) = cli.save_unprocessed {
        let wrote = output::text::save_unprocessed_list(target, &outcome.unprocessed)
            .with_context(|| format!("failed to save unprocessed files to {}", target.display()))?;
        log::info!("Saved {} unprocessed files to {}", wrote, target.display());
    }

    Ok(if outcome.summary.interrupted {
        ExitCode::Interrupted
    } else if outcome.summary.duplicates > 0 {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    })
}

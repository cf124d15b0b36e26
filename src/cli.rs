//! Command-line interface definitions.
//!
//! Single-purpose tool, so no subcommands: the scan arguments live directly
//! on [`Cli`].
//!
//! # Example
//!
//! ```bash
//! # Scan a media tree
//! videodupe /home/seed/media/TV
//!
//! # Scan a pre-built list of paths with 4 workers
//! videodupe --list filepaths.log --workers 4
//!
//! # Save the redundant copies to a file and emit JSON
//! videodupe ~/media --save-dupes dupes.log --output json
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find duplicate movies and TV episodes by parsed filename metadata.
///
/// videodupe derives a content identity from each video file's name (title,
/// season/episode, year, ...) and reports files that resolve to the same
/// identity. File contents are never read.
#[derive(Debug, Parser)]
#[command(name = "videodupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicate movies / tv episodes
    #[arg(value_name = "PATH", required_unless_present = "list")]
    pub path: Option<PathBuf>,

    /// Scan a plaintext file of newline-separated paths instead of walking
    #[arg(long, value_name = "FILE", conflicts_with = "path")]
    pub list: Option<PathBuf>,

    /// Worker threads for classification (default: available parallelism)
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Output format for the scan report
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save redundant copies (one path per line) to this file
    #[arg(long, value_name = "FILE")]
    pub save_dupes: Option<PathBuf>,

    /// Save skipped non-video paths to this file
    #[arg(long, value_name = "FILE")]
    pub save_skipped: Option<PathBuf>,

    /// Save unprocessed paths and reasons to this file
    #[arg(long, value_name = "FILE")]
    pub save_unprocessed: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console summary
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_path_or_list() {
        assert!(Cli::try_parse_from(["videodupe"]).is_err());
        assert!(Cli::try_parse_from(["videodupe", "/media"]).is_ok());
        assert!(Cli::try_parse_from(["videodupe", "--list", "paths.log"]).is_ok());
    }

    #[test]
    fn test_cli_path_conflicts_with_list() {
        let result = Cli::try_parse_from(["videodupe", "/media", "--list", "paths.log"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["videodupe", "/media"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.workers.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["videodupe", "/media", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}

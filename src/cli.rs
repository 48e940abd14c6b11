//! Command-line interface definitions for treediff.
//!
//! All arguments are defined with the clap derive API. The tool has a
//! single purpose, so there are no subcommands: two directories in, a
//! change report out.
//!
//! # Example
//!
//! ```bash
//! # Compare two checkouts, human-readable report
//! treediff ./v1 ./v2
//!
//! # Machine-readable output for scripting
//! treediff ./v1 ./v2 --output json
//!
//! # Show content diffs, ignore logs, skip hidden files
//! treediff ./v1 ./v2 --diffs --ignore '*.log' --skip-hidden
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compare two file-tree snapshots.
///
/// treediff walks both directories, fingerprints every file (BLAKE3),
/// and reports additions, deletions, modifications and moves, most
/// significant change first. Exit code 0 means the trees are identical,
/// 1 means changes were found, 2 means something went wrong.
#[derive(Debug, Parser)]
#[command(name = "treediff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First snapshot root ("side A", the before tree)
    #[arg(value_name = "DIR_A")]
    pub dir_a: PathBuf,

    /// Second snapshot root ("side B", the after tree)
    #[arg(value_name = "DIR_B")]
    pub dir_b: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Print content diffs for modified files (text output only)
    #[arg(short, long)]
    pub diffs: bool,

    /// Glob patterns to exclude (can be specified multiple times)
    ///
    /// Applied to both sides in addition to the built-in exclusions
    /// (node_modules, .git, dist, target, ...).
    #[arg(short = 'i', long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as structured JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for the change report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the treediff CLI.
///
/// Follows the diff(1) convention:
/// - 0: Trees are identical (no change records)
/// - 1: Changes were found (completed normally)
/// - 2: General error (unexpected failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// The two snapshots are identical.
    Identical = 0,
    /// The comparison completed and found changes.
    ChangesFound = 1,
    /// An unexpected error occurred.
    GeneralError = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Identical => "TD000",
            Self::ChangesFound => "TD001",
            Self::GeneralError => "TD002",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "TD002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}

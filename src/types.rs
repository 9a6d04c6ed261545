//! Common types for midi-e2e.
//!
//! Defines per-file verdicts and the aggregate result of a run.

use std::path::PathBuf;

/// Exit code the validator uses to report a rejected MIDI file.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Outcome of validating a single file.
///
/// Only an exit code of exactly [`FAILURE_EXIT_CODE`] is a failure. Any other
/// code, including codes above 1 and termination by a signal, counts as a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Validator accepted the file (or exited with anything other than 1).
    Passed,
    /// Validator exited with code 1.
    Failed,
}

impl Verdict {
    /// Classifies a validator exit code. `None` means the child was killed by a signal.
    pub const fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(FAILURE_EXIT_CODE) => Self::Failed,
            _ => Self::Passed,
        }
    }

    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Result of running the validator on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    /// Path handed to the validator.
    pub path: PathBuf,
    /// Raw exit code (`None` when terminated by a signal).
    pub exit_code: Option<i32>,
    /// Classification of `exit_code`.
    pub verdict: Verdict,
}

impl FileResult {
    pub fn new(path: PathBuf, exit_code: Option<i32>) -> Self {
        Self {
            path,
            exit_code,
            verdict: Verdict::from_exit_code(exit_code),
        }
    }

    /// True when the exit code was neither 0 nor 1 but still classified as a pass.
    pub const fn is_unexpected_pass(&self) -> bool {
        !matches!(self.exit_code, Some(0 | FAILURE_EXIT_CODE))
    }
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of MIDI files tested.
    pub total: usize,
    /// Files the validator rejected, in processing order.
    pub failures: Vec<PathBuf>,
}

impl RunSummary {
    /// Counts `result` and records it if it failed.
    pub fn record(&mut self, result: FileResult) {
        self.total += 1;
        if result.verdict.is_fail() {
            self.failures.push(result.path);
        }
    }

    pub fn passed(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

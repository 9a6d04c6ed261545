//! Console output for a run.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::types::RunSummary;

/// Prints the path of the file about to be validated.
///
/// Flushed immediately: the validator shares our stdout and must not print
/// ahead of this line.
pub fn write_progress(out: &mut impl Write, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", path.display())?;
    out.flush()
}

/// Prints `"<passed> of <total> passed"` followed by one `" ! <path>"` line
/// per failure.
pub fn write_summary(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    let tally = format!("{} of {} passed", summary.passed(), summary.total);
    if summary.all_passed() {
        writeln!(out, "{}", tally.green())?;
    } else {
        writeln!(out, "{}", tally.red())?;
    }

    for path in &summary.failures {
        writeln!(out, " {} {}", "!".red(), path.display())?;
    }

    out.flush()
}

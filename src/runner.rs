//! Runner for the MIDI validator.
//!
//! Walks the test root, invokes the validator once per MIDI file and tallies
//! the results by exit code.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::HarnessConfig;
use crate::discovery::discover_midi_files;
use crate::error::{HarnessError, Result};
use crate::report::{write_progress, write_summary};
use crate::types::{FileResult, RunSummary};

/// Runs `executable <file>` and waits for it to exit.
///
/// The child inherits stdin, stdout and stderr. A failure to spawn is an
/// error; every exit status, including death by signal, is a result.
pub fn validate_file(executable: &Path, file: &Path) -> Result<FileResult> {
    debug!("Running {} {}", executable.display(), file.display());

    let status = Command::new(executable)
        .arg(file)
        .status()
        .map_err(|source| HarnessError::Spawn {
            executable: executable.to_path_buf(),
            file: file.to_path_buf(),
            source,
        })?;

    let result = FileResult::new(file.to_path_buf(), status.code());
    if result.is_unexpected_pass() {
        debug!(
            "{} exited with {status} for {}; counted as passed",
            executable.display(),
            file.display()
        );
    }

    Ok(result)
}

/// Validates every MIDI file under the configured root, one at a time.
///
/// Writes one progress line per file and the summary to `out`. Aborts on the
/// first spawn failure.
pub fn run(config: &HarnessConfig, out: &mut impl Write) -> Result<RunSummary> {
    let files = discover_midi_files(&config.root_directory);
    let mut summary = RunSummary::default();

    for file in files {
        write_progress(out, &file)?;
        let result = validate_file(&config.executable_path, &file)?;
        summary.record(result);
    }

    write_summary(out, &summary)?;
    Ok(summary)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::types::Verdict;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writes a fixture that `sh` will run as a script exiting with `body`.
    fn fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, format!("{body}\n")).unwrap();
        path
    }

    fn sh_config(root: &Path) -> HarnessConfig {
        HarnessConfig {
            executable_path: PathBuf::from("sh"),
            root_directory: root.to_path_buf(),
        }
    }

    fn run_quiet(config: &HarnessConfig) -> (RunSummary, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let summary = run(config, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn validate_file_classifies_exit_codes() {
        let dir = TempDir::new().unwrap();
        let sh = Path::new("sh");

        let ok = validate_file(sh, &fixture(dir.path(), "ok.mid", "exit 0")).unwrap();
        assert_eq!(ok.exit_code, Some(0));
        assert_eq!(ok.verdict, Verdict::Passed);

        let bad = validate_file(sh, &fixture(dir.path(), "bad.mid", "exit 1")).unwrap();
        assert_eq!(bad.exit_code, Some(1));
        assert_eq!(bad.verdict, Verdict::Failed);

        let odd = validate_file(sh, &fixture(dir.path(), "odd.mid", "exit 2")).unwrap();
        assert_eq!(odd.exit_code, Some(2));
        assert_eq!(odd.verdict, Verdict::Passed);
    }

    #[test]
    fn killed_validator_counts_as_passed() {
        let dir = TempDir::new().unwrap();
        let file = fixture(dir.path(), "crash.mid", "kill -9 $$");

        let result = validate_file(Path::new("sh"), &file).unwrap();
        assert_eq!(result.exit_code, None);
        assert_eq!(result.verdict, Verdict::Passed);
    }

    #[test]
    fn mixed_case_extensions_all_pass() {
        let dir = TempDir::new().unwrap();
        fixture(dir.path(), "a.mid", "exit 0");
        fixture(dir.path(), "b.MID", "exit 0");
        fixture(dir.path(), "c.txt", "exit 1");

        let (summary, _) = run_quiet(&sh_config(dir.path()));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed(), 2);
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn exit_code_one_is_recorded_as_failure() {
        let dir = TempDir::new().unwrap();
        let x = fixture(dir.path(), "x.mid", "exit 1");
        fixture(dir.path(), "y.mid", "exit 0");

        let (summary, output) = run_quiet(&sh_config(dir.path()));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.failures, vec![x.clone()]);
        assert!(output.contains("1 of 2 passed\n"));
        assert!(output.ends_with(&format!(" ! {}\n", x.display())));
    }

    #[test]
    fn empty_tree_runs_nothing() {
        let dir = TempDir::new().unwrap();

        let (summary, output) = run_quiet(&sh_config(dir.path()));
        assert_eq!(summary, RunSummary::default());
        assert_eq!(output, "0 of 0 passed\n");
    }

    #[test]
    fn exit_code_two_counts_as_passed() {
        let dir = TempDir::new().unwrap();
        fixture(dir.path(), "z.mid", "exit 2");

        let (summary, output) = run_quiet(&sh_config(dir.path()));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.passed(), 1);
        assert!(summary.failures.is_empty());
        assert!(output.contains("1 of 1 passed"));
    }

    #[test]
    fn progress_lines_precede_summary() {
        let dir = TempDir::new().unwrap();
        let only = fixture(dir.path(), "nested/only.mid", "exit 0");

        let (_, output) = run_quiet(&sh_config(dir.path()));
        assert_eq!(output, format!("{}\n1 of 1 passed\n", only.display()));
    }

    #[test]
    fn repeated_runs_agree() {
        let dir = TempDir::new().unwrap();
        fixture(dir.path(), "a.mid", "exit 1");
        fixture(dir.path(), "sub/b.mid", "exit 0");
        fixture(dir.path(), "sub/c.MID", "exit 1");
        fixture(dir.path(), "sub/d.mid", "exit 3");

        let config = sh_config(dir.path());
        let (mut first, _) = run_quiet(&config);
        let (mut second, _) = run_quiet(&config);
        first.failures.sort();
        second.failures.sort();

        assert_eq!(first, second);
        assert_eq!(first.total, 4);
        assert_eq!(first.failed(), 2);
        assert_eq!(first.passed() + first.failed(), first.total);
    }

    #[test]
    fn symlinked_midi_files_are_validated() {
        let dir = TempDir::new().unwrap();
        fixture(dir.path(), "store/real.bin", "exit 1");
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        let link = data.join("link.mid");
        std::os::unix::fs::symlink("../store/real.bin", &link).unwrap();

        let (summary, _) = run_quiet(&sh_config(&data));
        assert_eq!(summary.total, 1);
        assert_eq!(summary.failures, vec![link]);
    }

    #[test]
    fn missing_validator_aborts_the_run() {
        let dir = TempDir::new().unwrap();
        fixture(dir.path(), "a.mid", "exit 0");
        let config = HarnessConfig {
            executable_path: dir.path().join("no-such-validator"),
            root_directory: dir.path().to_path_buf(),
        };

        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();
        assert!(matches!(err, HarnessError::Spawn { .. }));
    }

    #[test]
    fn missing_root_reports_empty_run() {
        let dir = TempDir::new().unwrap();
        let config = HarnessConfig {
            executable_path: dir.path().join("never-spawned"),
            root_directory: dir.path().join("absent"),
        };

        let (summary, output) = run_quiet(&config);
        assert_eq!(summary, RunSummary::default());
        assert_eq!(output, "0 of 0 passed\n");
    }
}

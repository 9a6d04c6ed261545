//! MIDI file discovery.
//!
//! Recursively enumerates the test root for files with a `.mid` extension.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

const MIDI_SUFFIX: &str = ".mid";

/// Returns true if the file name ends with `.mid`, ignoring case.
pub fn is_midi_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| name.ends_with(MIDI_SUFFIX))
}

/// Lists every non-directory `.mid` entry under `root` in walk order.
///
/// Symlinks are not descended into, but a symlink that resolves to anything
/// other than a directory is selected like a plain file. A missing or
/// unreadable root yields an empty list; unreadable entries below it are
/// skipped. Both cases only log a warning.
pub fn discover_midi_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        warn!("Test root {} is not a readable directory", root.display());
        return Vec::new();
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !is_directory(&entry) && is_midi_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!("Found {} MIDI files under {}", files.len(), root.display());
    files
}

// Symlinks to directories count as directories, broken links do not.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

//! Harness configuration.
//!
//! Resolves the validator binary and the test root from CLI flags, an optional
//! YAML file, the environment, and defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};

/// Environment variable naming the validator binary.
pub const VALIDATOR_ENV: &str = "MIDITOOL_BIN";

const DEFAULT_VALIDATOR: &str = "miditool";
const DEFAULT_ROOT: &str = "data";

/// Configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Validator invoked once per MIDI file.
    pub executable_path: PathBuf,
    /// Directory walked for `.mid` files.
    pub root_directory: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            executable_path: PathBuf::from(DEFAULT_VALIDATOR),
            root_directory: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

/// Config file structure. Both keys are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub executable_path: Option<PathBuf>,
    pub root_directory: Option<PathBuf>,
}

/// Parses a YAML config file body.
pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile> {
    // An empty document deserializes to unit, not a mapping.
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml_ng::from_str(content).map_err(|source| HarnessError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a YAML config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

impl HarnessConfig {
    /// Builds a config with flags taking precedence over the file, and the
    /// file over discovery and defaults.
    pub fn resolve(
        binary: Option<PathBuf>,
        root: Option<PathBuf>,
        file: Option<ConfigFile>,
    ) -> Self {
        let file = file.unwrap_or_default();

        let executable_path = binary
            .or(file.executable_path)
            .or_else(find_validator_binary)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VALIDATOR));

        let root_directory = root
            .or(file.root_directory)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));

        Self {
            executable_path,
            root_directory,
        }
    }
}

/// Finds the validator binary from `MIDITOOL_BIN` or a local build directory.
///
/// Returns `None` when neither exists; callers then fall back to `miditool`
/// on `PATH`.
pub fn find_validator_binary() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(VALIDATOR_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let relative = Path::new("build").join(DEFAULT_VALIDATOR);
    if relative.is_file() {
        return Some(relative);
    }

    None
}

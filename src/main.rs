//! midi-e2e: CLI entry point.
//!
//! Runs a MIDI validator over every `.mid` file in a directory tree.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use midi_e2e::config::{load_config_file, HarnessConfig};
use midi_e2e::runner::run;

#[derive(Parser)]
#[command(name = "midi-e2e")]
#[command(about = "E2E validation of a MIDI validator against a .mid corpus")]
#[command(version)]
#[command(after_help = "ENVIRONMENT:\n    MIDITOOL_BIN     Validator binary\n    RUST_LOG=debug   Enable debug logging")]
struct Cli {
    /// Path to the validator binary (or set `MIDITOOL_BIN` env var).
    #[arg(short, long)]
    binary: Option<PathBuf>,

    /// Directory searched recursively for `.mid` files [default: data].
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// YAML file with `executable_path` and `root_directory`.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let file = cli
        .config
        .as_deref()
        .map(load_config_file)
        .transpose()
        .context("Failed to load harness config")?;

    let config = HarnessConfig::resolve(cli.binary, cli.root, file);
    info!(
        "Validator: {}, root: {}",
        config.executable_path.display(),
        config.root_directory.display()
    );

    // Failures are reported, not reflected in the exit status.
    let summary = run(&config, &mut io::stdout().lock()).with_context(|| {
        format!(
            "Run aborted (validator {}, root {})",
            config.executable_path.display(),
            config.root_directory.display()
        )
    })?;
    info!("{} of {} passed", summary.passed(), summary.total);

    Ok(())
}

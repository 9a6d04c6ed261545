//! midi-e2e: E2E validation of a MIDI validator binary.
//!
//! Walks a corpus of `.mid` files, runs the validator on each one, and
//! reports which files it rejected (exit code 1).

pub mod config;
pub mod discovery;
pub mod error;
pub mod report;
pub mod runner;
pub mod types;

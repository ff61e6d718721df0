//! # landreg-cli
//!
//! Subcommand handlers for the `landreg` binary. Each handler returns the
//! process exit code; errors bubble up as `anyhow::Error`.

pub mod input;
pub mod tiers;
pub mod workflow;

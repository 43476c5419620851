//! CLI module for svcutil
//!
//! Provides command-line access to:
//! - id: generate identifiers
//! - digest / verify: SHA-256 of a file, checked against a claim
//! - store: verify and persist a file
//! - rm: batch delete

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{digest, generate_ids, remove, run, run_command, store, verify};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};

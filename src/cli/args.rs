//! CLI argument definitions using clap
//!
//! Commands:
//! - svcutil id [--count N]
//! - svcutil digest <file>
//! - svcutil verify <file> --checksum <hex>
//! - svcutil store <source> [dest] --checksum <hex>
//! - svcutil rm <paths>...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// svcutil - identifiers and integrity-checked file storage
#[derive(Parser, Debug)]
#[command(name = "svcutil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate identifiers
    Id {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },

    /// Print the SHA-256 of a file
    Digest { file: PathBuf },

    /// Check a file against a claimed SHA-256
    Verify {
        file: PathBuf,

        #[arg(long)]
        checksum: String,
    },

    /// Verify a file and write it into storage
    Store {
        source: PathBuf,

        /// Target path; relative paths resolve under storage_root.
        /// Defaults to a fresh identifier plus the source extension.
        dest: Option<PathBuf>,

        #[arg(long)]
        checksum: String,
    },

    /// Remove files, ignoring ones that do not exist
    Rm {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

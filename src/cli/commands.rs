//! CLI command implementations
//!
//! Each command returns the `data` payload; `run` wraps it in the JSON
//! envelope and writes it to stdout.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::clock::time_now;
use crate::config::Config;
use crate::encoding::base64_encode;
use crate::file_storage::{delete_all, ensure_dir, type_by_filename};
use crate::id::IdGenerator;
use crate::integrity::Sha256Reader;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments, runs the command and writes exactly one JSON line.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let result = load_config(cli.config.as_deref())
        .and_then(|config| run_command(cli.command, &config));

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &Config) -> CliResult<Value> {
    match cmd {
        Command::Id { count } => generate_ids(count),
        Command::Digest { file } => digest(&file),
        Command::Verify { file, checksum } => verify(config, &file, &checksum),
        Command::Store {
            source,
            dest,
            checksum,
        } => store(config, &source, dest.as_deref(), &checksum),
        Command::Rm { paths } => remove(&paths),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn open(path: &Path) -> CliResult<File> {
    File::open(path)
        .map_err(|e| CliError::io_error(format!("Failed to open {}: {}", path.display(), e)))
}

/// `count` fresh identifiers
pub fn generate_ids(count: usize) -> CliResult<Value> {
    let mut generator = IdGenerator::new();
    let ids = (0..count)
        .map(|_| generator.generate().map(|id| id.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({ "ids": ids }))
}

/// Stream a file through SHA-256
pub fn digest(file: &Path) -> CliResult<Value> {
    let mut reader = Sha256Reader::new(open(file)?);
    io::copy(&mut reader, &mut io::sink())?;

    let size = reader.len();
    let content_type = file
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(type_by_filename);
    let raw = reader.finalize();
    let hex: String = raw.iter().map(|b| format!("{:02x}", b)).collect();

    Ok(json!({
        "path": file.display().to_string(),
        "size": size,
        "sha256": hex,
        // Digest header form
        "sha256_base64": base64_encode(&raw),
        "content_type": content_type,
    }))
}

/// Ingest a file as if it were an upload
pub fn verify(config: &Config, file: &Path, checksum: &str) -> CliResult<Value> {
    let bytes = config.ingestor().ingest(open(file)?, checksum)?;

    Ok(json!({
        "path": file.display().to_string(),
        "size": bytes.len(),
        "sha256": checksum,
    }))
}

/// Ingest `source`, then persist it to `dest` (or a generated name under
/// the storage root)
pub fn store(config: &Config, source: &Path, dest: Option<&Path>, checksum: &str) -> CliResult<Value> {
    let bytes = config.ingestor().ingest(open(source)?, checksum)?;

    let (target, id) = match dest {
        Some(dest) => (resolve(config, dest), None),
        None => {
            let id = IdGenerator::new().generate()?.to_string();
            let name = match source.extension().and_then(|e| e.to_str()) {
                Some(ext) => format!("{}.{}", id, ext),
                None => id.clone(),
            };
            (config.storage_root.join(name), Some(id))
        }
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent, config.dir_mode)?;
    }

    let persisted = config.persister().persist_bytes(&target, &bytes)?;
    tracing::info!(path = %persisted.path.display(), size = persisted.size, "stored upload");

    Ok(json!({
        "id": id,
        "path": persisted.path.display().to_string(),
        "size": persisted.size,
        "mode": format!("{:o}", persisted.mode),
        "sha256": checksum,
        "stored_at": time_now(),
    }))
}

fn resolve(config: &Config, dest: &Path) -> PathBuf {
    if dest.is_absolute() {
        dest.to_path_buf()
    } else {
        config.storage_root.join(dest)
    }
}

/// Batch delete
pub fn remove(paths: &[PathBuf]) -> CliResult<Value> {
    delete_all(paths)?;
    Ok(json!({ "requested": paths.len() }))
}

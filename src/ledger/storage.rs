use super::types::{DateKey, GameRecord, HistoryLedger};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the default history file path (~/.config/tenbo/history.json)
pub fn get_history_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("history.json"))
}

/// Either persisted layout. The flat list predates date grouping.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Dated(HistoryLedger),
    Legacy(Vec<GameRecord>),
}

/// Outcome of reading the history file.
#[derive(Debug, PartialEq)]
pub enum Loaded {
    /// Nothing on disk yet
    Missing,
    Current(HistoryLedger),
    /// Flat legacy list, regrouped under the migration date
    Migrated(HistoryLedger),
    /// The file exists but could not be parsed
    Malformed(String),
}

/// Parse a serialized ledger, upgrading the legacy flat format onto `today`.
pub fn parse_ledger(contents: &str, today: DateKey) -> Loaded {
    match serde_json::from_str::<StoredLedger>(contents) {
        Ok(StoredLedger::Dated(ledger)) => Loaded::Current(ledger),
        Ok(StoredLedger::Legacy(games)) => Loaded::Migrated(HistoryLedger::from_legacy(games, today)),
        Err(e) => Loaded::Malformed(e.to_string()),
    }
}

/// Read the history file at `path`.
///
/// Only I/O failures other than "not found" are errors; contents that don't
/// parse come back as `Loaded::Malformed`.
pub fn load_ledger(path: &Path, today: DateKey) -> Result<Loaded> {
    if !path.exists() {
        return Ok(Loaded::Missing);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file at {}", path.display()))?;

    Ok(parse_ledger(&contents, today))
}

/// Save the whole ledger to `path` atomically
///
/// Uses atomic-write-file so a crash mid-write never leaves a truncated file.
/// Creates the parent directory if it doesn't exist.
pub fn save_ledger(path: &Path, ledger: &HistoryLedger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, ledger).context("Failed to serialize history")?;

    file.commit().context("Failed to save history")?;

    Ok(())
}

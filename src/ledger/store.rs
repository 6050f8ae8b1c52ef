use super::storage::{load_ledger, save_ledger, Loaded};
use super::types::{DateKey, GameRecord, HistoryLedger};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// The persisted ledger, owned by whoever runs the session.
///
/// Loaded once on open and written out in full after every mutation.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: HistoryLedger,
}

impl LedgerStore {
    /// Open the history at `path`.
    ///
    /// A missing or unparseable file yields an empty ledger. A legacy flat
    /// list is regrouped under `today` and written back immediately.
    pub fn open(path: impl Into<PathBuf>, today: DateKey) -> Result<Self> {
        let path = path.into();

        let ledger = match load_ledger(&path, today)? {
            Loaded::Missing => {
                log::debug!("No history at {}, starting empty", path.display());
                HistoryLedger::new()
            }
            Loaded::Current(ledger) => {
                log::debug!(
                    "Loaded {} games over {} dates from {}",
                    ledger.game_count(),
                    ledger.all_dates_sorted().len(),
                    path.display()
                );
                ledger
            }
            Loaded::Migrated(ledger) => {
                log::info!(
                    "Migrated {} legacy games in {} onto {}",
                    ledger.game_count(),
                    path.display(),
                    today
                );
                save_ledger(&path, &ledger)?;
                ledger
            }
            Loaded::Malformed(reason) => {
                log::warn!(
                    "Ignoring unreadable history at {} ({}), starting empty",
                    path.display(),
                    reason
                );
                HistoryLedger::new()
            }
        };

        Ok(Self { path, ledger })
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a game and persist
    pub fn register(&mut self, date: DateKey, record: GameRecord) -> Result<()> {
        self.ledger.register(date, record);
        self.flush()
    }

    /// Drop every recorded game and persist. Callers confirm first.
    pub fn clear(&mut self) -> Result<()> {
        self.ledger.clear();
        self.flush()
    }

    /// Write the whole ledger back to disk
    pub fn flush(&self) -> Result<()> {
        save_ledger(&self.path, &self.ledger)?;
        log::debug!("Saved {} games to {}", self.ledger.game_count(), self.path.display());
        Ok(())
    }
}

pub mod storage;
pub mod store;
pub mod table;
pub mod types;

pub use storage::{get_history_path, load_ledger, parse_ledger, save_ledger, Loaded};
pub use store::LedgerStore;
pub use table::HistoryTable;
pub use types::{DateKey, Direction, GameRecord, HistoryLedger, PlayerResult};

pub mod codec;
pub mod text_backend;

use std::path::{Path, PathBuf};

use crate::{errors::Result, ledger::Ledger};

pub use codec::{DecodeReport, SkipReason, SkippedLine};
pub use text_backend::TextStorage;

/// Outcome of reading the persisted ledger.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub skipped: Vec<SkippedLine>,
    pub path: PathBuf,
    /// False when no ledger file existed yet.
    pub existed: bool,
}

/// Abstraction over persistence backends capable of storing a ledger.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<LoadReport>;
    /// Replaces the persisted ledger with `ledger` in full.
    fn save(&self, ledger: &Ledger) -> Result<()>;
    /// Directory holding the ledger file.
    fn location(&self) -> &Path;
    fn ledger_path(&self) -> PathBuf;
}

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    core::utils::{ensure_dir, tmp_path, write_atomic, PathResolver},
    errors::Result,
    ledger::Ledger,
};

use super::{codec, LoadReport, StorageBackend};

/// Plain-text ledger file inside a records directory.
#[derive(Debug, Clone)]
pub struct TextStorage {
    records_dir: PathBuf,
    ledger_file: PathBuf,
}

impl TextStorage {
    /// Opens storage rooted at `records_dir`, creating the directory if needed.
    pub fn new(records_dir: PathBuf) -> Result<Self> {
        ensure_dir(&records_dir)?;
        let ledger_file = PathResolver::ledger_file_in(&records_dir);
        Ok(Self {
            records_dir,
            ledger_file,
        })
    }
}

impl StorageBackend for TextStorage {
    fn load(&self) -> Result<LoadReport> {
        let raw = match fs::read_to_string(&self.ledger_file) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.ledger_file.display(), "no ledger file yet");
                return Ok(LoadReport {
                    ledger: Ledger::new(),
                    skipped: Vec::new(),
                    path: self.ledger_file.clone(),
                    existed: false,
                });
            }
            Err(err) => return Err(err.into()),
        };
        let decoded = codec::decode(&raw);
        Ok(LoadReport {
            ledger: Ledger::from_records(decoded.records),
            skipped: decoded.skipped,
            path: self.ledger_file.clone(),
            existed: true,
        })
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let body = codec::encode(ledger);
        let tmp = tmp_path(&self.ledger_file);
        write_atomic(&tmp, &body)?;
        fs::rename(&tmp, &self.ledger_file)?;
        debug!(records = ledger.len(), path = %self.ledger_file.display(), "ledger flushed");
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.records_dir
    }

    fn ledger_path(&self) -> PathBuf {
        self.ledger_file.clone()
    }
}

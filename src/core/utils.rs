use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "TCASH_HOME";
const DEFAULT_DIR_NAME: &str = ".tcash";
const RECORDS_DIR: &str = "transaction_records";
const LEDGER_FILE: &str = "transactions.txt";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Resolves where application data lives on disk.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory: `$TCASH_HOME`, else `~/.tcash`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    /// Default directory holding the ledger file.
    pub fn records_dir_in(base: &Path) -> PathBuf {
        base.join(RECORDS_DIR)
    }

    pub fn ledger_file_in(records_dir: &Path) -> PathBuf {
        records_dir.join(LEDGER_FILE)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Creates `path` and its parents when missing.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// Sibling staging path, e.g. `transactions.txt` -> `transactions.txt.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_nests_ledger_file_under_records_dir() {
        let base = Path::new("/tmp/tcash-home");
        let records = PathResolver::records_dir_in(base);
        assert_eq!(records, base.join("transaction_records"));
        assert_eq!(
            PathResolver::ledger_file_in(&records),
            base.join("transaction_records").join("transactions.txt")
        );
        assert_eq!(PathResolver::config_file_in(base), base.join("config.json"));
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("existing directory is fine");
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let path = Path::new("/data/transactions.txt");
        assert_eq!(tmp_path(path), PathBuf::from("/data/transactions.txt.tmp"));
        assert_eq!(tmp_path(Path::new("/data/ledger")), PathBuf::from("/data/ledger.tmp"));
    }
}

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{info, warn};

#[cfg(target_os = "windows")]
const PLATFORM_OPENER: &str = "explorer";
#[cfg(target_os = "macos")]
const PLATFORM_OPENER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const PLATFORM_OPENER: &str = "xdg-open";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// A file manager was launched on the directory.
    Opened(PathBuf),
    /// No opener could run; the caller should show the path instead.
    Reported(PathBuf),
}

impl RevealOutcome {
    pub fn path(&self) -> &Path {
        match self {
            RevealOutcome::Opened(path) | RevealOutcome::Reported(path) => path,
        }
    }
}

/// Opens `dir` with `opener` (or the platform default), falling back to reporting its path.
pub fn reveal_dir(dir: &Path, opener: Option<&str>) -> RevealOutcome {
    let absolute = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    let program = opener.unwrap_or(PLATFORM_OPENER);
    // explorer.exe exits non-zero even when it opened the window
    let tolerate_exit_code = cfg!(target_os = "windows") && opener.is_none();

    match Command::new(program).arg(&absolute).status() {
        Ok(status) if status.success() || tolerate_exit_code => {
            info!(program, path = %absolute.display(), "opened storage directory");
            RevealOutcome::Opened(absolute)
        }
        Ok(status) => {
            warn!(program, %status, "opener exited unsuccessfully");
            RevealOutcome::Reported(absolute)
        }
        Err(err) => {
            warn!(program, error = %err, "unable to launch opener");
            RevealOutcome::Reported(absolute)
        }
    }
}

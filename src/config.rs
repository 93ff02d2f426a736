//! Fixed targets: registry path, flag name, log file location

#[cfg(feature = "log-file")]
use std::env;
#[cfg(feature = "log-file")]
use std::path::PathBuf;

#[cfg(feature = "log-file")]
use crate::error::LogInitError;

/// Per-user tray icon settings (under HKCU)
pub const ROOT_PATH: &str = r"Control Panel\NotifyIconSettings";
/// DWORD flag controlling "always show"
pub const PROMOTED_FIELD: &str = "IsPromoted";
pub const PROMOTED: u32 = 1;
/// Effective value for a missing or non-DWORD flag
pub const NOT_PROMOTED: i64 = -1;
#[cfg(feature = "log-file")]
pub const LOG_FILE_NAME: &str = "log.txt";

/// Where the runner looks and what it writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub root_path: String,
    pub field: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root_path: ROOT_PATH.to_string(),
            field: PROMOTED_FIELD.to_string(),
        }
    }
}

/// log.txt beside the running executable
#[cfg(feature = "log-file")]
pub fn log_path() -> Result<PathBuf, LogInitError> {
    let exe = env::current_exe().map_err(|_| LogInitError::ExePath)?;
    let dir = exe.parent().ok_or(LogInitError::ExePath)?;
    Ok(dir.join(LOG_FILE_NAME))
}

//! Error types for tray-promote

use std::io;
#[cfg(feature = "log-file")]
use std::path::PathBuf;
use thiserror::Error;

/// Settings store errors (per-child: counted and skipped; root: fatal)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[cfg(not(windows))]
    #[error("Settings store unavailable on this platform")]
    Unavailable,
}

impl StoreError {
    /// Store reported the node as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Log sink setup errors (fatal before any store access)
#[cfg(feature = "log-file")]
#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("Executable path not found")]
    ExePath,

    #[error("Cannot open log file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

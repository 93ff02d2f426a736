//! Run output: console, optionally mirrored into an append-only log file

#[cfg(feature = "log-file")]
use std::fs::{File, OpenOptions};
#[cfg(feature = "log-file")]
use std::io::{self, Write};
#[cfg(feature = "log-file")]
use std::path::Path;

#[cfg(feature = "log-file")]
use chrono::Local;
#[cfg(feature = "log-file")]
use tracing::warn;

#[cfg(feature = "log-file")]
use crate::error::LogInitError;

#[cfg(feature = "log-file")]
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Destination for human-readable status lines
pub trait Sink {
    fn info(&mut self, line: &str);
    fn error(&mut self, line: &str);
}

/// info → stdout, error → stderr
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn info(&mut self, line: &str) {
        println!("{line}");
    }

    fn error(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Console output plus timestamped lines appended to a log file
///
/// The file is opened once and closed on drop.
#[cfg(feature = "log-file")]
#[derive(Debug)]
pub struct LogFileSink<W: Write = File> {
    console: ConsoleSink,
    log: W,
}

#[cfg(feature = "log-file")]
impl LogFileSink<File> {
    /// Open (create or append) the log file; never truncates
    pub fn open(path: &Path) -> Result<Self, LogInitError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogInitError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file))
    }
}

#[cfg(feature = "log-file")]
impl<W: Write> LogFileSink<W> {
    pub fn new(log: W) -> Self {
        Self {
            console: ConsoleSink,
            log,
        }
    }

    fn append(&mut self, line: &str) {
        if let Err(e) = write_line(&mut self.log, line) {
            warn!("Log append failed: {e}");
        }
    }
}

#[cfg(feature = "log-file")]
impl<W: Write> Sink for LogFileSink<W> {
    fn info(&mut self, line: &str) {
        self.console.info(line);
        self.append(line);
    }

    fn error(&mut self, line: &str) {
        self.console.error(line);
        self.append(line);
    }
}

/// `[YYYY-MM-DD HH:MM:SS] line`, flushed
#[cfg(feature = "log-file")]
fn write_line<W: Write>(log: &mut W, line: &str) -> io::Result<()> {
    writeln!(log, "[{}] {line}", Local::now().format(TIMESTAMP_FORMAT))?;
    log.flush()
}

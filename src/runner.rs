//! Promotion runner: set IsPromoted = 1 on every tray icon entry

use tracing::{debug, info};

use crate::config::{NOT_PROMOTED, PROMOTED, RunConfig};
use crate::error::StoreError;
use crate::sink::Sink;
use crate::status::ExitStatus;
use crate::store::{SettingsNode, SettingsStore};

/// Result of processing one entry (exactly one per child)
#[derive(Debug)]
pub enum EntryOutcome {
    /// Child could not be opened; not an error
    Skipped,
    AlreadyPromoted,
    Promoted,
    Failed(StoreError),
}

/// Counters of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub changed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub status: ExitStatus,
}

impl RunResult {
    fn new() -> Self {
        Self {
            changed: 0,
            errors: 0,
            skipped: 0,
            unchanged: 0,
            status: ExitStatus::Success,
        }
    }

    fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Skipped => self.skipped += 1,
            EntryOutcome::AlreadyPromoted => self.unchanged += 1,
            EntryOutcome::Promoted => self.changed += 1,
            EntryOutcome::Failed(_) => self.errors += 1,
        }
    }

    /// Entries seen, in any outcome
    pub fn total(&self) -> usize {
        self.changed + self.errors + self.skipped + self.unchanged
    }

    fn summary(&self) -> String {
        format!(
            "Done. Updated {} icon entries. Errors: {}.",
            self.changed, self.errors
        )
    }
}

pub struct PromotionRunner<S> {
    store: S,
    config: RunConfig,
}

impl<S: SettingsStore> PromotionRunner<S> {
    pub fn new(store: S, config: RunConfig) -> Self {
        Self { store, config }
    }

    /// Promote every child of the root; per-child failures never abort the run
    pub fn run(&self, sink: &mut dyn Sink) -> RunResult {
        let mut result = RunResult::new();
        let root_display = format!(r"HKCU\{}", self.config.root_path);
        sink.info(&format!("Promoting tray icons under {root_display}..."));

        let opened = match self.store.open(&self.config.root_path) {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        };
        let root = match opened {
            Ok(Some(root)) => root,
            Ok(None) => {
                sink.error(&format!("Registry key not found: {root_display}"));
                result.status = ExitStatus::NotFound;
                return result;
            }
            Err(e) => return critical(sink, &root_display, &e, result),
        };

        let names = match root.children() {
            Ok(names) => names,
            Err(e) => return critical(sink, &root_display, &e, result),
        };
        debug!(count = names.len(), "enumerated entries");

        for name in &names {
            let outcome = self.promote_entry(&root, name);
            match &outcome {
                EntryOutcome::Skipped => debug!(entry = %name, "skipped (cannot open)"),
                EntryOutcome::AlreadyPromoted => debug!(entry = %name, "already promoted"),
                EntryOutcome::Promoted => debug!(entry = %name, "promoted"),
                EntryOutcome::Failed(e) => sink.error(&format!("Failed on {name}: {e}")),
            }
            result.record(&outcome);
        }

        result.status = ExitStatus::from_errors(result.errors);
        sink.info(&result.summary());
        info!(
            total = result.total(),
            changed = result.changed,
            errors = result.errors,
            skipped = result.skipped,
            unchanged = result.unchanged,
            "run complete"
        );
        result
    }

    /// Open → read → conditionally write one entry; the child node drops on return
    pub fn promote_entry(&self, root: &S::Node, name: &str) -> EntryOutcome {
        let field = self.config.field.as_str();
        let attempt = || -> Result<EntryOutcome, StoreError> {
            let Some(entry) = root.open_child(name)? else {
                return Ok(EntryOutcome::Skipped);
            };
            let current = entry.get_dword(field)?.map_or(NOT_PROMOTED, i64::from);
            if current == i64::from(PROMOTED) {
                return Ok(EntryOutcome::AlreadyPromoted);
            }
            entry.set_dword(field, PROMOTED)?;
            Ok(EntryOutcome::Promoted)
        };
        attempt().unwrap_or_else(EntryOutcome::Failed)
    }
}

/// Root open or enumeration failed: report, summarize partial counts
fn critical(
    sink: &mut dyn Sink,
    root_display: &str,
    e: &StoreError,
    mut result: RunResult,
) -> RunResult {
    debug!(error = ?e, "root unavailable");
    sink.error(&format!("Critical failure on {root_display}: {e}"));
    result.status = ExitStatus::Critical;
    sink.info(&result.summary());
    result
}

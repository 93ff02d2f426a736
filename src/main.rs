//! Tray Promote: mark every notification area icon as "always show"

mod config;
mod error;
#[cfg(windows)]
mod registry;
mod runner;
mod sink;
mod status;
mod store;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use config::RunConfig;
use runner::PromotionRunner;
use sink::Sink;
use status::ExitStatus;
use store::SettingsStore;

fn main() -> ExitCode {
    init_tracing();
    execute(open_sink, settings_store()).into()
}

/// Open the sink, then run against `store`
///
/// A sink failure ends the run before the store is opened.
fn execute<S, F>(open_sink: F, store: S) -> ExitStatus
where
    S: SettingsStore,
    F: FnOnce() -> anyhow::Result<Box<dyn Sink>>,
{
    let mut sink = match open_sink() {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitStatus::LogInit;
        }
    };

    let result = PromotionRunner::new(store, RunConfig::default()).run(sink.as_mut());
    drop(sink);

    println!("Finished.");
    result.status
}

/// Diagnostics to stderr, opt-in via RUST_LOG
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "log-file")]
fn open_sink() -> anyhow::Result<Box<dyn Sink>> {
    use anyhow::Context;

    let path = config::log_path().context("Logging init")?;
    let sink = sink::LogFileSink::open(&path).context("Logging init")?;
    tracing::debug!(path = %path.display(), "log file opened");
    Ok(Box::new(sink))
}

#[cfg(not(feature = "log-file"))]
fn open_sink() -> anyhow::Result<Box<dyn Sink>> {
    Ok(Box::new(sink::ConsoleSink))
}

#[cfg(windows)]
fn settings_store() -> registry::Registry {
    registry::Registry::current_user()
}

#[cfg(not(windows))]
fn settings_store() -> store::UnavailableStore {
    store::UnavailableStore
}

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::OptionalWriter;
use tracing_subscriber::EnvFilter;

/// Set while the TUI owns the screen; stderr output is discarded meanwhile.
static STDERR_PAUSED: AtomicBool = AtomicBool::new(false);

/// Keeps stderr logging muted until dropped.
pub struct StderrPause {
    previous: bool,
}

impl Drop for StderrPause {
    fn drop(&mut self) {
        STDERR_PAUSED.store(self.previous, Ordering::SeqCst);
    }
}

pub fn pause_stderr() -> StderrPause {
    StderrPause {
        previous: STDERR_PAUSED.swap(true, Ordering::SeqCst),
    }
}

fn stderr_writer() -> OptionalWriter<io::Stderr> {
    if STDERR_PAUSED.load(Ordering::SeqCst) {
        OptionalWriter::none()
    } else {
        OptionalWriter::some(io::stderr())
    }
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `-v`.
///
/// Without a log file, events emitted while the TUI owns the screen are
/// dropped; pass a log file to keep them.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(stderr_writer)
                .init();
        }
    }
    Ok(())
}

// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::options::LogOptions;

#[doc(hidden)]
pub use tracing;

static APPEND_LOCK: Mutex<()> = Mutex::new(());
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber: stderr always, a daily rolling file when asked.
/// Safe to call more than once; later calls are ignored.
pub fn init(opts: &LogOptions) {
    let level = opts.level();
    // Our own events at the chosen level, dependencies only when they warn.
    let filter = EnvFilter::new(format!("warn,wr_scrape={level}"));

    let stderr = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .boxed();

    let file = opts.file_dir.as_ref().and_then(|dir| {
        if fs::create_dir_all(dir).is_err() {
            return None;
        }
        let appender = tracing_appender::rolling::daily(dir, "wr_scrape.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        Some(fmt::layer().with_ansi(false).with_writer(writer).boxed())
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init();
}

/// Append one timestamped line to a plain log file (failed items and similar).
pub fn append_line(path: &Path, msg: &str) {
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let line = format!("{stamp} - {msg}\n");

    if let Ok(_guard) = APPEND_LOCK.lock() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::tracing::error!($($arg)*)
    };
}

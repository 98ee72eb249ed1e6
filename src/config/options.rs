// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/// Where everything lives on disk. All paths hang off one root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataDirs {
    pub root: PathBuf,
}

impl Default for DataDirs {
    fn default() -> Self {
        Self { root: PathBuf::from(".") }
    }
}

impl DataDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
    pub fn items(&self) -> PathBuf { self.root.join(ITEMS_DIR) }
    pub fn runes(&self) -> PathBuf { self.root.join(RUNES_DIR) }
    pub fn champions(&self) -> PathBuf { self.root.join(CHAMPIONS_DIR) }
    pub fn clean_champions(&self) -> PathBuf { self.root.join(CLEAN_CHAMPIONS_DIR) }
    pub fn logs(&self) -> PathBuf { self.root.join(LOGS_DIR) }

    pub fn item_index(&self) -> PathBuf { self.items().join(INDEX_FILE) }
    pub fn rune_index(&self) -> PathBuf { self.runes().join(INDEX_FILE) }

    pub fn file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub head_timeout_secs: u64,
    /// Pause between consecutive page fetches.
    pub pause_ms: u64,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            user_agent: s!(USER_AGENT),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            head_timeout_secs: HEAD_TIMEOUT_SECS,
            pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

impl NetOptions {
    /// Absolute URL for a site path. Absolute inputs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return s!(path);
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') { join!(base, path) } else { join!(base, "/", path) }
    }

    /// Same options with every politeness/backoff sleep removed. Tests use this.
    pub fn without_pauses(mut self) -> Self {
        self.pause_ms = 0;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    pub max_champions: Option<usize>,
    pub discover_only: bool,
    pub workers: usize,
    /// Enrich build lists with live item data.
    pub enhance: bool,
    pub champion_pause_ms: u64,
    pub retry_pause_ms: u64,
    pub max_retries: usize,
    pub item_pause_ms: u64,
    pub item_retry_base_ms: u64,
    pub max_item_retries: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_champions: None,
            discover_only: false,
            workers: WORKERS,
            enhance: true,
            champion_pause_ms: CHAMPION_PAUSE_MS,
            retry_pause_ms: RETRY_PAUSE_MS,
            max_retries: MAX_CHAMPION_RETRIES,
            item_pause_ms: ITEM_PAUSE_MS,
            item_retry_base_ms: ITEM_RETRY_BASE_MS,
            max_item_retries: MAX_ITEM_RETRIES,
        }
    }
}

impl BatchOptions {
    pub fn without_pauses(mut self) -> Self {
        self.champion_pause_ms = 0;
        self.retry_pause_ms = 0;
        self.item_pause_ms = 0;
        self.item_retry_base_ms = 0;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub verbose: bool,
    pub quiet: bool,
    /// Directory for the rolling log file; `None` keeps logging on stderr only.
    pub file_dir: Option<PathBuf>,
}

impl LogOptions {
    pub fn level(&self) -> &'static str {
        if self.verbose { "debug" } else if self.quiet { "warn" } else { "info" }
    }
}

// src/scrape/report.rs
//! Failure bookkeeping for batch runs: per-item failure records, the plain
//! `failed_items.log`, and the JSON error report written at the end.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::consts::{ERROR_REPORT_FILE, FAILED_ITEMS_LOG};
use crate::error::Result;
use crate::log::append_line;
use crate::store;

use super::enhance::EnhanceStats;

pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `"3/4 (75.0%)"`, or `"0/0 (0%)"` when there is nothing to rate.
pub fn success_rate(ok: usize, total: usize) -> String {
    if total == 0 {
        return s!("0/0 (0%)");
    }
    format!("{ok}/{total} ({:.1}%)", ok as f64 / total as f64 * 100.0)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailedItem {
    pub name: String,
    pub reason: String,
    pub timestamp: String,
    pub retry_attempts: usize,
    pub fallback_attempted: bool,
}

impl FailedItem {
    pub fn new(name: &str, reason: impl Into<String>, retry_attempts: usize) -> Self {
        Self {
            name: s!(name),
            reason: reason.into(),
            timestamp: timestamp(),
            retry_attempts,
            fallback_attempted: true,
        }
    }

    /// Append to `<logs>/failed_items.log`.
    pub fn append_to(&self, logs_dir: &Path) {
        append_line(&logs_dir.join(FAILED_ITEMS_LOG), &format!("FAILED: {} - {}", self.name, self.reason));
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChampionFailure {
    pub champion: String,
    pub error: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_failed_items: usize,
    pub total_successful_items: usize,
    pub total_cached_items: usize,
    pub champion_failures: usize,
    pub overall_success_rate: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub timestamp: String,
    pub failed_items: Vec<FailedItem>,
    pub item_scrape_stats: EnhanceStats,
    pub champion_enhancement_failures: Vec<ChampionFailure>,
    pub summary: ReportSummary,
}

impl ErrorReport {
    pub fn new(stats: EnhanceStats, failed_items: Vec<FailedItem>, champion_failures: Vec<ChampionFailure>) -> Self {
        let ok = stats.success;
        let summary = ReportSummary {
            total_failed_items: failed_items.len(),
            total_successful_items: ok,
            total_cached_items: stats.cached,
            champion_failures: champion_failures.len(),
            overall_success_rate: success_rate(ok, ok + failed_items.len()),
        };
        Self {
            timestamp: timestamp(),
            failed_items,
            item_scrape_stats: stats,
            champion_enhancement_failures: champion_failures,
            summary,
        }
    }

    /// Write `<logs>/error_report.json`.
    pub fn write(&self, logs_dir: &Path) -> Result<PathBuf> {
        let path = logs_dir.join(ERROR_REPORT_FILE);
        store::write_json(&path, self)?;
        Ok(path)
    }

    /// Failure reasons by count, most common first, at most `n`.
    pub fn top_reasons(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for f in &self.failed_items {
            *counts.entry(f.reason.as_str()).or_default() += 1;
        }
        let mut v: Vec<(String, usize)> = counts.into_iter().map(|(r, c)| (s!(r), c)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        v.truncate(n);
        v
    }

    pub fn print_summary(&self) {
        println!("\n=== ERROR SUMMARY ===");
        println!("Failed Items: {}", self.summary.total_failed_items);
        println!("Successful Items: {}", self.summary.total_successful_items);
        println!("Cached Items: {}", self.summary.total_cached_items);
        println!("Champion Enhancement Failures: {}", self.summary.champion_failures);
        let top = self.top_reasons(5);
        if !top.is_empty() {
            println!("\nMost Common Failure Reasons:");
            for (reason, count) in top {
                println!("  - {reason}: {count} items");
            }
        }
        println!("===================\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates() {
        assert_eq!(success_rate(0, 0), "0/0 (0%)");
        assert_eq!(success_rate(3, 4), "3/4 (75.0%)");
    }

    #[test]
    fn top_reasons_are_ordered_and_capped() {
        let failed: Vec<FailedItem> = ["a", "b", "b", "c", "c", "c", "d", "e", "f"]
            .iter()
            .enumerate()
            .map(|(i, r)| FailedItem::new(&format!("item{i}"), *r, 2))
            .collect();
        let report = ErrorReport::new(EnhanceStats::default(), failed, Vec::new());
        let top = report.top_reasons(5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], (s!("c"), 3));
        assert_eq!(top[1], (s!("b"), 2));
        assert_eq!(report.summary.overall_success_rate, "0/9 (0.0%)");
    }
}

// src/patch/mod.rs
//! Idempotent fixers over saved records.
//!
//! Each patcher inspects specific fields and overwrites them from the catalog
//! only when they look empty or low quality. A file is rewritten only when its
//! record actually changed, so a second run over the same directory is a no-op.
use std::fmt;
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::options::DataDirs;
use crate::error::Result;
use crate::model::Item;
use crate::store;

pub mod descriptions;
pub mod details;
pub mod duplicates;
pub mod runes;
pub mod stats;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Records read.
    pub examined: usize,
    /// Files rewritten.
    pub changed: usize,
    /// Records with nothing to patch from (not in the catalog, or disputed).
    pub skipped: usize,
    /// Files that could not be read or written.
    pub errors: usize,
}

impl PatchSummary {
    pub fn merge(&mut self, other: PatchSummary) {
        self.examined += other.examined;
        self.changed += other.changed;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} examined, {} changed, {} skipped, {} errors", self.examined, self.changed, self.skipped, self.errors)
    }
}

/// What a patch closure did to one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    Skipped,
}

/// Load every item in `dir`, hand it to `patch`, write it back when changed.
/// The rewrite keeps the file's own key order and explicit nulls.
pub(crate) fn walk_items(dir: &Path, mut patch: impl FnMut(&mut Item) -> Outcome) -> Result<PatchSummary> {
    let mut sum = PatchSummary::default();
    for (path, rec) in store::load_all_raw::<Item>(dir)? {
        let (raw, mut item) = match rec {
            Ok(pair) => pair,
            Err(e) => {
                loge!("{e}");
                sum.errors += 1;
                continue;
            }
        };
        sum.examined += 1;
        match patch(&mut item) {
            Outcome::Skipped => sum.skipped += 1,
            Outcome::Unchanged => {}
            Outcome::Changed => match store::write_record(&path, &raw, &item) {
                Ok(true) => {
                    logf!("patched {}", item.name);
                    sum.changed += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    loge!("{e}");
                    sum.errors += 1;
                }
            },
        }
    }
    Ok(sum)
}

/// Every patcher in its fixed order, then an item index refresh.
pub fn run_all(dirs: &DataDirs, catalog: &Catalog) -> Result<Vec<(&'static str, PatchSummary)>> {
    let items = dirs.items();
    let out = vec![
        ("details", details::patch(&items, catalog)?),
        ("descriptions", descriptions::patch(&items)?),
        ("stats", stats::patch(&items, catalog)?),
        ("runes", runes::patch(&dirs.runes(), catalog)?),
        ("duplicates", duplicates::patch(&items)?.summary),
    ];
    store::refresh_item_index(&items)?;
    Ok(out)
}

// src/patch/duplicates.rs
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::sanitize::file_slug;
use crate::error::{Error, Result};
use crate::model::Item;
use crate::store;

use super::PatchSummary;

#[derive(Debug, Default)]
pub struct DuplicateReport {
    pub summary: PatchSummary,
    /// Name, later file, first file.
    pub duplicates: Vec<(String, PathBuf, PathBuf)>,
    /// Old path, new path.
    pub renamed: Vec<(PathBuf, PathBuf)>,
}

/// Report records sharing a display name and move files whose stem is not
/// `file_slug(name)` to the canonical name, unless that file already exists.
pub fn patch(dir: &Path) -> Result<DuplicateReport> {
    let mut out = DuplicateReport::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for (path, rec) in store::load_all::<Item>(dir)? {
        let item = match rec {
            Ok(item) => item,
            Err(e) => {
                loge!("{e}");
                out.summary.errors += 1;
                continue;
            }
        };
        out.summary.examined += 1;
        if item.name.is_empty() {
            out.summary.skipped += 1;
            continue;
        }

        if let Some(first) = seen.get(&item.name) {
            logw!("duplicate {}: {} and {}", item.name, store::file_name_of(&path), store::file_name_of(first));
            out.duplicates.push((item.name.clone(), path.clone(), first.clone()));
            continue;
        }
        seen.insert(item.name.clone(), path.clone());

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let slug = file_slug(&item.name);
        if stem == slug {
            continue;
        }
        let target = store::item_path(dir, &item.name);
        if target.exists() {
            logw!("{}: {} should be {}, which already exists", item.name, store::file_name_of(&path), store::file_name_of(&target));
            continue;
        }
        fs::rename(&path, &target).map_err(|e| Error::io(&path, e))?;
        logf!("renamed {} -> {}", store::file_name_of(&path), store::file_name_of(&target));
        seen.insert(item.name.clone(), target.clone());
        out.renamed.push((path, target));
        out.summary.changed += 1;
    }

    if out.duplicates.is_empty() {
        logf!("no duplicates found");
    }
    logf!("duplicates: {}", out.summary);
    Ok(out)
}

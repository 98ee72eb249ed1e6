// src/validate/crossref.rs
use std::collections::BTreeSet;
use std::path::Path;

use crate::config::consts::{CHAMPION_LIST_FILE, MASTER_FILE};
use crate::core::sanitize::clean_item_name;
use crate::error::Result;
use crate::model::{BuildCategory, Champion};
use crate::store;

use super::{subject_of, Report, Severity};

/// Check one champion's build lists against the item files in `items_dir`.
/// Every list is checked, enchants and the example build included. A missing
/// item is reported once per champion, however many lists name it. Empty item
/// categories are Info notes.
pub fn check_champion(report: &mut Report, file: &str, champ: &Champion, items_dir: &Path) {
    let subject = subject_of(&champ.champion.name, file);
    let categories: Vec<&str> = BuildCategory::ALL.iter().map(|c| c.key()).collect();
    let mut lists: Vec<(String, &Vec<String>)> = Vec::new();
    for (key, list) in champ.builds.named_lists() {
        match list {
            Some(v) if !v.is_empty() => lists.push((s!(key), v)),
            _ if categories.contains(&key) => {
                report.push(Severity::Info, file, &subject, format!("{key} is empty"));
            }
            _ => {}
        }
    }
    for (lane, build) in champ.builds.lane_specific.iter().flatten() {
        for (key, list) in build.named_lists() {
            lists.push((format!("{lane} {key}"), list));
        }
    }

    let mut seen = BTreeSet::new();
    for (key, names) in lists {
        for raw in names {
            let name = clean_item_name(raw);
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            if !store::item_path(items_dir, &name).exists() {
                report.push(Severity::Warning, file, &subject, format!("{key} references missing item '{name}'"));
            }
        }
    }
}

pub fn validate(items_dir: &Path, champion_dirs: &[&Path]) -> Result<Report> {
    let mut report = Report::new("cross-reference validation");
    for dir in champion_dirs {
        for (path, rec) in store::load_all::<Champion>(dir)? {
            let file = store::file_name_of(&path);
            if file == MASTER_FILE || file == CHAMPION_LIST_FILE {
                continue;
            }
            report.checked += 1;
            match rec {
                Ok(champ) => check_champion(&mut report, &file, &champ, items_dir),
                Err(e) => report.push(Severity::Error, &file, &file, e.to_string()),
            }
        }
    }
    Ok(report)
}

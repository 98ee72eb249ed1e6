// src/validate/schema.rs
//! Structural checks on raw JSON, so records too broken to load as typed
//! values still get a precise report.
use std::path::Path;

use serde_json::Value;

use crate::config::consts::{CHAMPION_LIST_FILE, MASTER_FILE};
use crate::error::Result;
use crate::store;

use super::{subject_of, Report, Severity};

pub const ITEM_FIELDS: &[&str] = &["name", "stats", "cost", "description"];
pub const CHAMPION_SECTIONS: &[&str] = &["champion", "stats", "abilities", "builds"];

fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(_) => false,
    }
}

fn name_of(v: &Value) -> &str {
    v.get("name").and_then(Value::as_str).unwrap_or_default()
}

pub fn check_item(report: &mut Report, file: &str, v: &Value) {
    let subject = subject_of(name_of(v), file);
    for field in ITEM_FIELDS {
        match v.get(field) {
            None => report.push(Severity::Error, file, &subject, format!("missing {field}")),
            Some(x) if is_empty(x) => report.push(Severity::Error, file, &subject, format!("empty {field}")),
            Some(_) => {}
        }
    }
    if let Some(stats) = v.get("stats").and_then(Value::as_object) {
        for (key, stat) in stats {
            if stat.get("value").is_none() {
                report.push(Severity::Error, file, &subject, format!("stat {key} has no value"));
            }
        }
    }
}

pub fn check_champion(report: &mut Report, file: &str, v: &Value) {
    let name = v.get("champion").map(name_of).unwrap_or_default();
    let subject = subject_of(name, file);
    for section in CHAMPION_SECTIONS {
        match v.get(section) {
            None => report.push(Severity::Error, file, &subject, format!("missing section {section}")),
            Some(x) if is_empty(x) => report.push(Severity::Warning, file, &subject, format!("empty section {section}")),
            Some(_) => {}
        }
    }
}

fn walk(dir: &Path, report: &mut Report, check: fn(&mut Report, &str, &Value)) -> Result<()> {
    for path in store::json_files(dir)? {
        let file = store::file_name_of(&path);
        if file == MASTER_FILE || file == CHAMPION_LIST_FILE {
            continue;
        }
        report.checked += 1;
        match store::read_json::<Value>(&path) {
            Ok(v) => check(report, &file, &v),
            Err(e) => report.push(Severity::Error, &file, &file, e.to_string()),
        }
    }
    Ok(())
}

/// Items in `items_dir`, champions in each of `champion_dirs`.
pub fn validate(items_dir: &Path, champion_dirs: &[&Path]) -> Result<Report> {
    let mut report = Report::new("schema validation");
    walk(items_dir, &mut report, check_item)?;
    for dir in champion_dirs {
        walk(dir, &mut report, check_champion)?;
    }
    Ok(report)
}

// src/validate/tips.rs
use std::path::Path;

use crate::error::Result;
use crate::model::Item;

use super::{records, subject_of, Report, Severity};

pub fn validate(dir: &Path) -> Result<Report> {
    let mut report = Report::new("item tips validation");
    for (file, item) in records::<Item>(dir, &mut report)? {
        if !item.has_tips() {
            let what = if item.tips.is_none() { "tips missing" } else { "tips empty" };
            report.push(Severity::Warning, &file, &subject_of(&item.name, &file), what);
        }
    }
    Ok(report)
}

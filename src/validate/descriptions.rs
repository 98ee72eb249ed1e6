// src/validate/descriptions.rs
use std::path::Path;

use crate::error::Result;
use crate::model::Item;

use super::{records, subject_of, Report, Severity};

pub fn validate(dir: &Path) -> Result<Report> {
    let mut report = Report::new("item description validation");
    for (file, item) in records::<Item>(dir, &mut report)? {
        let desc = item.description_str();
        let subject = subject_of(&item.name, &file);
        if desc.trim().is_empty() {
            report.push(Severity::Error, &file, &subject, "description empty");
        } else if desc.contains("...") {
            report.push(Severity::Warning, &file, &subject, "description truncated");
        }
    }
    Ok(report)
}

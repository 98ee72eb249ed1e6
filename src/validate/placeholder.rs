// src/validate/placeholder.rs
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::consts::MIN_REAL_DESCRIPTION_LEN;
use crate::error::Result;
use crate::model::Item;

use super::{records, subject_of, Report, Severity};

/// First placeholder phrase found in `text`, compared case-insensitively.
pub fn placeholder_phrase<'a>(text: &str, phrases: &'a [String]) -> Option<&'a str> {
    let lower = text.to_lowercase();
    phrases.iter().map(String::as_str).find(|p| lower.contains(&p.to_lowercase()))
}

/// Flag stand-in text, near-empty descriptions and records without stats or cost.
pub fn check_item(report: &mut Report, file: &str, item: &Item, phrases: &[String]) {
    let subject = subject_of(&item.name, file);
    let desc = item.description_str();

    let phrase = placeholder_phrase(desc, phrases).or_else(|| placeholder_phrase(item.passive_str(), phrases));
    if let Some(p) = phrase {
        report.push(Severity::Error, file, &subject, format!("placeholder text \"{p}\""));
    }
    if desc.chars().count() <= MIN_REAL_DESCRIPTION_LEN {
        report.push(Severity::Error, file, &subject, format!("description is {} chars", desc.chars().count()));
    }
    if !item.has_stats() {
        report.push(Severity::Error, file, &subject, "no stats");
    }
    if item.cost_value().unwrap_or(0) == 0 {
        report.push(Severity::Error, file, &subject, "no cost");
    }
}

pub const REPORT_NAME: &str = "placeholder validation";

pub fn validate(dir: &Path, catalog: &Catalog) -> Result<Report> {
    let mut report = Report::new(REPORT_NAME);
    for (file, item) in records::<Item>(dir, &mut report)? {
        check_item(&mut report, &file, &item, &catalog.placeholder_phrases);
    }
    Ok(report)
}

/// Share of checked records with no errors, as a percentage.
pub fn completion_rate(report: &Report) -> f64 {
    if report.checked == 0 {
        return 0.0;
    }
    let ok = report.checked.saturating_sub(report.failing_subjects());
    ok as f64 / report.checked as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_match_is_case_insensitive() {
        let phrases = vec![s!("Details for"), s!("placeholder")];
        assert_eq!(placeholder_phrase("details FOR this item", &phrases), Some("Details for"));
        assert_eq!(placeholder_phrase("A real sentence.", &phrases), None);
    }

    #[test]
    fn empty_record_collects_every_problem() {
        let mut r = Report::new("t");
        check_item(&mut r, "x.json", &Item::named("X"), &[]);
        assert_eq!(r.count(Severity::Error), 3);
        assert!(!r.passed());
    }
}

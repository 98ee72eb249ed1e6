// src/validate/mod.rs
//! Read-only checks over saved records. Every validator returns a [`Report`];
//! the same files always produce the same report.
use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::catalog::Catalog;
use crate::config::options::DataDirs;
use crate::error::Result;
use crate::store;

pub mod crossref;
pub mod descriptions;
pub mod placeholder;
pub mod remote;
pub mod schema;
pub mod tips;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    /// File name the issue was found in.
    pub file: String,
    /// Item, rune or champion the issue is about.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({}): {}", self.severity, self.subject, self.file, self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub name: &'static str,
    pub checked: usize,
    /// Errors and warnings.
    pub issues: Vec<Issue>,
    /// Info severity lands here, so `issues` only grows with real problems.
    pub notes: Vec<Issue>,
}

impl Report {
    pub fn new(name: &'static str) -> Self {
        Self { name, ..Default::default() }
    }

    pub fn push(&mut self, severity: Severity, file: &str, subject: &str, message: impl Into<String>) {
        let issue = Issue { severity, file: s!(file), subject: s!(subject), message: message.into() };
        match severity {
            Severity::Info => self.notes.push(issue),
            _ => self.issues.push(issue),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Info => self.notes.len(),
            _ => self.issues.iter().filter(|i| i.severity == severity).count(),
        }
    }

    /// No errors and no warnings. Info notes do not fail a run.
    pub fn passed(&self) -> bool {
        self.count(Severity::Error) == 0 && self.count(Severity::Warning) == 0
    }

    /// Distinct subjects with at least one error or warning.
    pub fn failing_subjects(&self) -> usize {
        let mut v: Vec<&str> = self.issues.iter().map(|i| i.subject.as_str()).collect();
        v.sort_unstable();
        v.dedup();
        v.len()
    }

    pub fn merge(&mut self, other: Report) {
        self.checked += other.checked;
        self.issues.extend(other.issues);
        self.notes.extend(other.notes);
    }

    pub fn print(&self) {
        println!("\n=== {} ===", self.name.to_uppercase());
        println!("Checked: {}", self.checked);
        for issue in self.issues.iter().chain(&self.notes) {
            println!("  {issue}");
        }
        println!(
            "{} errors, {} warnings, {} info: {}",
            self.count(Severity::Error),
            self.count(Severity::Warning),
            self.count(Severity::Info),
            if self.passed() { "PASS" } else { "FAIL" }
        );
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

/// Load every record in `dir` as `T`. Unreadable files become Error issues.
pub(crate) fn records<T: DeserializeOwned>(dir: &Path, report: &mut Report) -> Result<Vec<(String, T)>> {
    let mut out = Vec::new();
    for (path, rec) in store::load_all::<T>(dir)? {
        let file = store::file_name_of(&path);
        report.checked += 1;
        match rec {
            Ok(v) => out.push((file, v)),
            Err(e) => report.push(Severity::Error, &file, &file, e.to_string()),
        }
    }
    Ok(out)
}

/// Display name, or the file stem when the record has none.
pub(crate) fn subject_of(name: &str, file: &str) -> String {
    if name.is_empty() { s!(file.trim_end_matches(".json")) } else { s!(name) }
}

/// Every offline validator, in a fixed order.
pub fn run_all(dirs: &DataDirs, catalog: &Catalog) -> Result<Vec<Report>> {
    let items = dirs.items();
    let (clean, scraped) = (dirs.clean_champions(), dirs.champions());
    let champion_dirs = [clean.as_path(), scraped.as_path()];
    Ok(vec![
        placeholder::validate(&items, catalog)?,
        tips::validate(&items)?,
        descriptions::validate(&items)?,
        schema::validate(&items, &champion_dirs)?,
        crossref::validate(&items, &champion_dirs)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(r: &mut Report, sev: Severity, subject: &str) {
        r.push(sev, "f.json", subject, "m");
    }

    #[test]
    fn info_does_not_fail_a_report() {
        let mut r = Report::new("t");
        issue(&mut r, Severity::Info, "a");
        assert!(r.passed());
        assert!(r.issues.is_empty());
        assert_eq!(r.count(Severity::Info), 1);
        issue(&mut r, Severity::Warning, "a");
        assert!(!r.passed());
        assert_eq!(r.exit_code(), 1);
    }

    #[test]
    fn failing_subjects_are_distinct() {
        let mut r = Report::new("t");
        issue(&mut r, Severity::Error, "a");
        issue(&mut r, Severity::Warning, "a");
        issue(&mut r, Severity::Error, "b");
        issue(&mut r, Severity::Info, "c");
        assert_eq!(r.failing_subjects(), 2);
    }
}

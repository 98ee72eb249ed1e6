// src/validate/remote.rs
//! Compare saved items against the live items page.
use std::path::Path;

use scraper::Html;

use crate::config::consts::ITEMS_PATH;
use crate::config::options::NetOptions;
use crate::core::net::Fetch;
use crate::error::Result;
use crate::model::Item;
use crate::specs::item::locate_item;

use super::{records, subject_of, Report, Severity};

fn ap(item: &Item) -> Option<String> {
    item.stat("ability_power").map(|s| s.value.to_string())
}

/// Differences between a local record and the same item read off the site.
/// Only fields the site actually shows are compared.
pub fn compare(local: &Item, remote: &Item) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(rc) = remote.cost_value() {
        if local.cost_value() != Some(rc) {
            out.push(format!("cost: local {:?}, remote {rc}", local.cost_value()));
        }
    }
    if let Some(rap) = ap(remote) {
        if ap(local).as_deref() != Some(rap.as_str()) {
            out.push(format!("ability_power: local {:?}, remote {rap}", ap(local)));
        }
    }
    let rp = remote.passive_str().trim();
    if !rp.is_empty() && !local.passive_str().to_lowercase().contains(&rp.to_lowercase()) {
        out.push(format!("passive: remote \"{rp}\" not in local text"));
    }
    out
}

/// One page fetch, then every local item (or just `only`) is looked up in it.
/// Items the page does not show are reported as Info.
pub fn verify<F: Fetch>(fetch: &F, net: &NetOptions, items_dir: &Path, only: Option<&str>) -> Result<Report> {
    let mut report = Report::new("remote verification");
    let mut locals = records::<Item>(items_dir, &mut report)?;
    if let Some(name) = only {
        locals.retain(|(_, i)| i.name.eq_ignore_ascii_case(name));
        report.checked = locals.len();
        if locals.is_empty() {
            report.push(Severity::Error, "", name, "no local record");
            return Ok(report);
        }
    }
    let doc = Html::parse_document(&fetch.get(&net.url(ITEMS_PATH))?);

    for (file, local) in locals {
        let subject = subject_of(&local.name, &file);
        match locate_item(&doc, &local.name)? {
            Some(remote) => {
                for diff in compare(&local, &remote) {
                    report.push(Severity::Warning, &file, &subject, diff);
                }
            }
            None => report.push(Severity::Info, &file, &subject, "not found on the live page"),
        }
    }
    Ok(report)
}

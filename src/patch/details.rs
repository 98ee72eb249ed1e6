// src/patch/details.rs
use std::path::Path;

use crate::catalog::{Catalog, EntityKind};
use crate::config::consts::MIN_DESCRIPTION_LEN;
use crate::error::Result;
use crate::model::Item;

use super::{walk_items, Outcome, PatchSummary};

/// Empty, cut off with `...`, or too short to be a real description.
pub fn needs_description(desc: &str) -> bool {
    desc.trim().is_empty() || desc.contains("...") || desc.chars().count() < MIN_DESCRIPTION_LEN
}

/// Description and tips for one record, from the catalog.
pub fn apply(item: &mut Item, catalog: &Catalog) -> Outcome {
    let Some(facts) = catalog.item(&item.name) else { return Outcome::Skipped };
    if facts.description.is_none() && facts.tips.is_none() {
        return Outcome::Skipped;
    }
    let mut changed = false;

    if needs_description(item.description_str()) {
        match (&facts.description, catalog.dispute(EntityKind::Item, &item.name, "description")) {
            (Some(desc), _) if item.description.as_ref() != Some(desc) => {
                item.description = Some(desc.clone());
                changed = true;
            }
            (None, Some(d)) => logw!("{}: not patching disputed {}", item.name, d.summary()),
            _ => {}
        }
    }

    if !item.has_tips() {
        if let Some(tips) = facts.tips.as_ref().filter(|t| !t.is_empty()) {
            item.tips = Some(tips.clone());
            changed = true;
        }
    }

    if changed { Outcome::Changed } else { Outcome::Unchanged }
}

pub fn patch(dir: &Path, catalog: &Catalog) -> Result<PatchSummary> {
    let sum = walk_items(dir, |item| apply(item, catalog))?;
    logf!("details: {sum}");
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_or_truncated_descriptions_need_patching() {
        assert!(needs_description(""));
        assert!(needs_description("Grants AP..."));
        assert!(needs_description("Short."));
        assert!(!needs_description(&"x".repeat(MIN_DESCRIPTION_LEN)));
    }

    #[test]
    fn unknown_items_are_skipped() {
        let mut item = Item::named("Not A Real Item");
        assert_eq!(apply(&mut item, Catalog::get()), Outcome::Skipped);
        assert_eq!(item, Item::named("Not A Real Item"));
    }

    #[test]
    fn long_descriptions_are_kept() {
        let mut item = Item::named("Rabadon's Deathcap");
        let mine = "y".repeat(150);
        item.description = Some(mine.clone());
        item.tips = Some(vec![s!("keep me")]);
        assert_eq!(apply(&mut item, Catalog::get()), Outcome::Unchanged);
        assert_eq!(item.description.as_deref(), Some(mine.as_str()));
    }
}

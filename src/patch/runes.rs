// src/patch/runes.rs
use std::path::Path;

use crate::catalog::{Catalog, EntityKind};
use crate::error::Result;
use crate::model::Rune;
use crate::store;

use super::PatchSummary;

fn blank(v: &Option<String>) -> bool {
    v.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Fill stand-in or missing rune fields from the catalog. Returns whether
/// anything changed; `None` when the catalog has no such rune.
pub fn apply(rune: &mut Rune, catalog: &Catalog) -> Option<bool> {
    let facts = catalog.rune(&rune.name)?;
    let placeholder = rune.is_placeholder();
    let before = rune.clone();

    let fill = |field: &str, slot: &mut Option<String>, src: &Option<String>, stale: bool| {
        if !(blank(slot) || stale) {
            return;
        }
        match src {
            Some(v) => *slot = Some(v.clone()),
            None => {
                if let Some(d) = catalog.dispute(EntityKind::Rune, &rune.name, field) {
                    logw!("{}: not patching disputed {}", rune.name, d.summary());
                }
            }
        }
    };
    let tree_unknown = rune.tree.as_deref() == Some("Unknown");
    let desc_stale = rune.description.as_deref().is_some_and(|d| d.starts_with("Rune effect for"));
    fill("tree", &mut rune.tree, &facts.tree, tree_unknown);
    fill("type", &mut rune.kind, &facts.kind, placeholder);
    fill("description", &mut rune.description, &facts.description, desc_stale);
    fill("cooldown", &mut rune.cooldown, &facts.cooldown, false);
    fill("tier", &mut rune.tier, &facts.tier, false);

    if rune.stats.as_ref().is_none_or(|s| s.is_empty()) {
        if let Some(stats) = &facts.stats {
            rune.stats = Some(stats.clone());
        }
    }
    Some(*rune != before)
}

/// Patch every rune file, then rebuild `runes/index.json`.
pub fn patch(dir: &Path, catalog: &Catalog) -> Result<PatchSummary> {
    let mut sum = PatchSummary::default();
    for (path, rec) in store::load_all_raw::<Rune>(dir)? {
        let (raw, mut rune) = match rec {
            Ok(pair) => pair,
            Err(e) => {
                loge!("{e}");
                sum.errors += 1;
                continue;
            }
        };
        sum.examined += 1;
        match apply(&mut rune, catalog) {
            None => sum.skipped += 1,
            Some(false) => {}
            Some(true) => match store::write_record(&path, &raw, &rune) {
                Ok(written) => {
                    if written {
                        logf!("patched rune {}", rune.name);
                        sum.changed += 1;
                    }
                }
                Err(e) => {
                    loge!("{e}");
                    sum.errors += 1;
                }
            },
        }
    }
    store::refresh_rune_index(dir)?;
    logf!("runes: {sum}");
    Ok(sum)
}

// src/patch/stats.rs
use std::path::Path;

use serde_json::Value;

use crate::catalog::{Catalog, EntityKind};
use crate::error::Result;
use crate::model::Item;

use super::{walk_items, Outcome, PatchSummary};

fn empty_list(v: &Option<Vec<String>>) -> bool {
    v.as_ref().is_none_or(|l| l.is_empty())
}

fn empty_str(v: &Option<String>) -> bool {
    v.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Absent, null or numerically zero. Entries in any other shape count as present.
fn stat_missing(item: &Item, key: &str) -> bool {
    match item.stats.as_ref().and_then(|s| s.get(key)) {
        None | Some(Value::Null) => true,
        Some(Value::Object(o)) => o.get("value").is_none_or(|v| v.is_null() || v.as_f64() == Some(0.0)),
        Some(v) => v.as_f64() == Some(0.0),
    }
}

/// Fill cost, stats, passive, build path, tier and tags from the catalog where
/// the record has nothing. Present values are left alone and lists are only
/// ever replaced whole when empty.
pub fn apply(item: &mut Item, catalog: &Catalog) -> Outcome {
    let Some(facts) = catalog.item(&item.name) else { return Outcome::Skipped };
    let name = item.name.clone();
    let warn_disputed = |field: &str| {
        if let Some(d) = catalog.dispute(EntityKind::Item, &name, field) {
            logw!("{name}: not patching disputed {}", d.summary());
        }
    };
    let mut changed = false;

    if item.cost_value().unwrap_or(0) == 0 {
        match facts.cost {
            Some(c) => {
                item.set_cost(c);
                changed = true;
            }
            None => warn_disputed("cost"),
        }
    }

    match &facts.stats {
        Some(src) => {
            for (key, value) in src {
                if stat_missing(item, key) {
                    item.stats.get_or_insert_default().insert(key.clone(), value.clone());
                    changed = true;
                }
            }
        }
        None if !item.has_stats() => warn_disputed("stats"),
        None => {}
    }

    if empty_str(&item.passive) {
        match &facts.passive {
            Some(p) => {
                item.passive = Some(p.clone());
                changed = true;
            }
            None => warn_disputed("passive"),
        }
    }

    if empty_list(&item.build_path) {
        match &facts.build_path {
            Some(bp) => {
                item.build_path = Some(bp.clone());
                changed = true;
            }
            None => warn_disputed("build_path"),
        }
    }

    if empty_str(&item.tier) {
        if let Some(t) = &facts.tier {
            item.tier = Some(t.clone());
            changed = true;
        }
    }

    if empty_list(&item.tags) {
        match &facts.tags {
            Some(tags) => {
                item.tags = Some(tags.clone());
                changed = true;
            }
            None => warn_disputed("tags"),
        }
    }

    if changed { Outcome::Changed } else { Outcome::Unchanged }
}

pub fn patch(dir: &Path, catalog: &Catalog) -> Result<PatchSummary> {
    let sum = walk_items(dir, |item| apply(item, catalog))?;
    logf!("stats: {sum}");
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stat;

    #[test]
    fn disputed_cost_is_left_empty() {
        let mut item = Item::named("Rabadon's Deathcap");
        apply(&mut item, Catalog::get());
        assert_eq!(item.cost_value(), None);
    }

    #[test]
    fn present_values_are_not_overwritten() {
        let c = Catalog::get();
        let Some((name, _)) = c.items.iter().find(|(_, f)| f.cost.is_some()) else { return };
        let mut item = Item::named(name.clone());
        item.set_cost(1);
        item.set_stat("attack_damage", Stat::flat(999));
        apply(&mut item, c);
        assert_eq!(item.cost_value(), Some(1));
        assert_eq!(item.stat("attack_damage"), Some(Stat::flat(999)));
    }

    #[test]
    fn odd_shaped_stats_are_kept() {
        let mut item = Item::named("Hullbreaker");
        item.stats = Some(serde_json::from_value(serde_json::json!({
            "attack_damage": {"value": "40", "type": "flat"},
            "health": {"value": 400, "type": "Flat"},
            "ability_haste": {"value": 0, "type": "flat"},
        })).unwrap());
        assert_eq!(apply(&mut item, Catalog::get()), Outcome::Changed);
        let stats = item.stats.unwrap();
        assert_eq!(stats["attack_damage"]["value"], "40");
        assert_eq!(stats["health"]["type"], "Flat");
        assert_eq!(stats["ability_haste"]["value"], 15);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let c = Catalog::get();
        let mut item = Item::named("Hullbreaker");
        assert_eq!(apply(&mut item, c), Outcome::Changed);
        assert_eq!(item.cost_value(), Some(3200));
        let tags = item.tags.clone();
        assert_eq!(apply(&mut item, c), Outcome::Unchanged);
        assert_eq!(item.tags, tags);
    }
}

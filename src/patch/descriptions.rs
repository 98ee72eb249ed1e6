// src/patch/descriptions.rs
//! Replaces the generic "real stats and effects" blurb with a description
//! built from the record's own stats, passive and name.
use std::path::Path;

use serde_json::Value;

use crate::config::consts::GENERIC_DESCRIPTION;
use crate::core::sanitize::first_sentence;
use crate::error::Result;
use crate::model::{Item, StatKind};

use super::{walk_items, Outcome, PatchSummary};

const EFFECT_MAX: usize = 120;

/// Stat key, display label, and whether the value always reads as a percentage.
const STAT_LABELS: &[(&str, &str, bool)] = &[
    ("attack_damage", "Attack Damage", false),
    ("ability_power", "Ability Power", false),
    ("health", "Health", false),
    ("armor", "Armor", false),
    ("magic_resist", "Magic Resist", false),
    ("lethality", "Lethality", false),
    ("critical_chance", "Critical Strike Chance", true),
    ("attack_speed", "Attack Speed", true),
    ("cooldown_reduction", "Cooldown Reduction", true),
    ("mana", "Mana", false),
    ("movement_speed", "Movement Speed", false),
    ("magic_penetration", "Magic Penetration", false),
    ("armor_penetration", "Armor Penetration", true),
    ("omnivamp", "Omnivamp", true),
    ("physical_vamp", "Physical Vamp", true),
];

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn stat_num(item: &Item, key: &str) -> f64 {
    item.stat(key).and_then(|s| s.value.as_f64()).unwrap_or(0.0)
}

/// `"100 Ability Power, 15 Ability Haste"`-style list, or `"various stats"`.
pub fn stats_text(item: &Item) -> String {
    let Some(stats) = item.stats.as_ref() else { return s!("various stats") };
    let parts: Vec<String> = STAT_LABELS
        .iter()
        .filter_map(|(key, label, pct)| {
            let entry = stats.get(*key)?;
            let value = entry.get("value").map(value_text).unwrap_or_else(|| value_text(entry));
            let is_pct = *pct || item.stat(key).is_some_and(|s| s.kind == StatKind::Percentage);
            Some(if is_pct { format!("{value}% {label}") } else { format!("{value} {label}") })
        })
        .collect();
    if parts.is_empty() { s!("various stats") } else { parts.join(", ") }
}

/// Rule chain by item kind. Effects are cut at a sentence boundary, never with an ellipsis.
pub fn generate(item: &Item) -> String {
    let name = item.name.as_str();
    let lower = name.to_lowercase();
    let stats = stats_text(item);
    let has = |k: &str| item.stats.as_ref().is_some_and(|s| s.contains_key(k));
    let passive = first_sentence(item.passive_str(), EFFECT_MAX);
    let active = first_sentence(item.active.as_deref().unwrap_or(""), EFFECT_MAX);
    let with = |base: String, effect: &str, fallback: &str| {
        if effect.is_empty() { format!("{base} {fallback}") } else { format!("{base} {effect}") }
    };

    if name.contains("Enchant") {
        return if active.is_empty() {
            format!("Boot enchantment that provides {stats} and additional effects.")
        } else {
            format!("Boot enchantment that provides {stats}. {active}")
        };
    }
    if ["boots", "greaves", "treads"].iter().any(|w| lower.contains(w)) {
        let base = format!("Provides {stats} and enhanced movement.");
        return if passive.is_empty() { base } else { format!("{base} {passive}") };
    }
    if has("lethality") || ["duskblade", "eclipse", "youmuu", "serpent"].iter().any(|w| lower.contains(w)) {
        return with(format!("Assassin item that provides {stats}."), &passive, "Enhances burst damage against squishy targets.");
    }
    if has("critical_chance") || ["infinity", "bloodthirster", "essence"].iter().any(|w| lower.contains(w)) {
        return with(format!("Critical strike item that provides {stats}."), &passive, "Core item for ADC champions.");
    }
    if has("ability_power") {
        return with(format!("Ability Power item that provides {stats}."), &passive, "Enhances magical damage and abilities.");
    }
    if stat_num(item, "armor") > 40.0 {
        return with(format!("Tank item that provides {stats}."), &passive, "Provides defensive capabilities against physical damage.");
    }
    if stat_num(item, "magic_resist") > 40.0 {
        return with(format!("Magic resistance item that provides {stats}."), &passive, "Provides defensive capabilities against magical damage.");
    }
    if stat_num(item, "health") > 300.0 {
        return with(format!("Health item that provides {stats}."), &passive, "Increases survivability and tankiness.");
    }
    if ["support", "sickle", "coin", "shield"].iter().any(|w| lower.contains(w)) {
        return with(format!("Support item that provides {stats}."), &passive, "Designed for support champions to aid their team.");
    }
    let base = format!("Provides {stats}.");
    if !passive.is_empty() {
        format!("{base} {passive}")
    } else if !active.is_empty() {
        format!("{base} {active}")
    } else {
        format!("{base} Enhances champion capabilities in Wild Rift.")
    }
}

pub fn apply(item: &mut Item) -> Outcome {
    if !item.description_str().contains(GENERIC_DESCRIPTION) {
        return Outcome::Unchanged;
    }
    item.description = Some(generate(item));
    Outcome::Changed
}

pub fn patch(dir: &Path) -> Result<PatchSummary> {
    let sum = walk_items(dir, apply)?;
    logf!("descriptions: {sum}");
    Ok(sum)
}

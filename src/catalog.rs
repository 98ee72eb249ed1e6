// src/catalog.rs
//! Versioned table of known item/rune data.
//!
//! One embedded JSON document (`data/catalog.json`) holds everything the
//! patchers may write: attested item and rune fields, manual champion URL
//! corrections, placeholder phrases and the keyword lists used to sort build
//! items. Values that different sources attest differently are not merged.
//! They are left out of the record and listed under `disputes`, and anything
//! that would have written them logs the dispute instead.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static RAW: &str = include_str!("../data/catalog.json");

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| match serde_json::from_str(RAW) {
    Ok(c) => c,
    Err(e) => {
        loge!("embedded catalog is invalid: {e}");
        Catalog::default()
    }
});

/// Attested fields for one item. Only the fields present here are ever written.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuneFacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

/// Where an item goes in a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Starting,
    Core,
    Boots,
    Situational,
    Enchant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Rune,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attestation {
    pub value: Value,
    pub source: String,
}

/// Two or more sources disagree on one field of one entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    pub entity: String,
    pub kind: EntityKind,
    pub field: String,
    pub values: Vec<Attestation>,
}

impl Dispute {
    /// `"cost: 3400 (attested-a) vs 3600 (attested-b)"`
    pub fn summary(&self) -> String {
        let vals: Vec<String> = self
            .values
            .iter()
            .map(|a| format!("{} ({})", short(&a.value), a.source))
            .collect();
        format!("{}: {}", self.field, vals.join(" vs "))
    }
}

fn short(v: &Value) -> String {
    let s = match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if s.chars().count() > 60 {
        let cut: String = s.chars().take(57).collect();
        join!(&cut, "...")
    } else {
        s
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub items: BTreeMap<String, ItemFacts>,
    #[serde(default)]
    pub runes: BTreeMap<String, RuneFacts>,
    /// URL slug → `{id}-{slug}`.
    #[serde(default)]
    pub url_corrections: BTreeMap<String, String>,
    #[serde(default)]
    pub placeholder_phrases: Vec<String>,
    #[serde(default)]
    pub starting_items: Vec<String>,
    #[serde(default)]
    pub boot_keywords: Vec<String>,
    #[serde(default)]
    pub enchant_keywords: Vec<String>,
    #[serde(default)]
    pub disputes: Vec<Dispute>,
}

impl Catalog {
    /// The embedded table.
    pub fn get() -> &'static Catalog {
        &CATALOG
    }

    /// Parse a catalog document, for callers that bring their own table.
    pub fn from_json(text: &str) -> crate::Result<Catalog> {
        serde_json::from_str(text).map_err(|e| parse_err!("catalog: {e}"))
    }

    pub fn item(&self, name: &str) -> Option<&ItemFacts> {
        self.items.get(name)
    }

    pub fn rune(&self, name: &str) -> Option<&RuneFacts> {
        self.runes.get(name)
    }

    pub fn dispute(&self, kind: EntityKind, entity: &str, field: &str) -> Option<&Dispute> {
        self.disputes
            .iter()
            .find(|d| d.kind == kind && d.entity == entity && d.field == field)
    }

    pub fn disputes_for(&self, kind: EntityKind, entity: &str) -> impl Iterator<Item = &Dispute> {
        self.disputes.iter().filter(move |d| d.kind == kind && d.entity == entity)
    }

    pub fn correction(&self, slug: &str) -> Option<&str> {
        self.url_corrections.get(slug).map(String::as_str)
    }

    /// Slot from the name alone: enchant keywords, then boot keywords, then the
    /// starting item list. `None` when the name says nothing.
    pub fn keyword_slot(&self, name: &str) -> Option<Slot> {
        let lower = name.to_lowercase();
        if self.enchant_keywords.iter().any(|k| lower.contains(k.as_str())) {
            Some(Slot::Enchant)
        } else if self.boot_keywords.iter().any(|k| lower.contains(k.as_str())) {
            Some(Slot::Boots)
        } else if self.starting_items.iter().any(|s| *s == lower) {
            Some(Slot::Starting)
        } else {
            None
        }
    }

    /// Known rune names; used to spot runes in champion pages.
    pub fn rune_names(&self) -> impl Iterator<Item = &str> {
        self.runes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let c: Catalog = serde_json::from_str(RAW).unwrap();
        assert!(!c.version.is_empty());
        assert!(c.items.contains_key("Rabadon's Deathcap"));
        assert_eq!(c.correction("kai-sa"), Some("366-kai-sa"));
    }

    #[test]
    fn disputed_fields_are_not_in_records() {
        let c = Catalog::get();
        for d in c.disputes.iter().filter(|d| d.kind == EntityKind::Item) {
            let facts = c.item(&d.entity).unwrap();
            let v = serde_json::to_value(facts).unwrap();
            assert!(v.get(&d.field).is_none(), "{} {}", d.entity, d.field);
            assert!(d.values.len() >= 2);
        }
    }

    #[test]
    fn keyword_slots() {
        let c = Catalog::get();
        assert_eq!(c.keyword_slot("Stasis Enchant"), Some(Slot::Enchant));
        assert_eq!(c.keyword_slot("Plated Steelcaps"), Some(Slot::Boots));
        assert_eq!(c.keyword_slot("Doran's Blade"), Some(Slot::Starting));
        assert_eq!(c.keyword_slot("Infinity Edge"), None);
    }

    #[test]
    fn rabadon_cost_is_disputed() {
        let d = Catalog::get()
            .dispute(EntityKind::Item, "Rabadon's Deathcap", "cost")
            .unwrap();
        assert!(d.summary().contains("3400"));
        assert!(d.summary().contains("3600"));
    }
}

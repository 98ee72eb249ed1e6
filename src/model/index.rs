// src/model/index.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemIndexEntry {
    pub file: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cost: u64,
    #[serde(default)]
    pub tier: String,
}

/// `items/index.json`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemIndex {
    #[serde(default)]
    pub items: BTreeMap<String, ItemIndexEntry>,
    #[serde(default)]
    pub total_items: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuneIndexEntry {
    pub file: String,
    #[serde(default)]
    pub tree: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub tier: String,
}

/// `runes/index.json`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuneIndex {
    #[serde(default)]
    pub runes: BTreeMap<String, RuneIndexEntry>,
    #[serde(default)]
    pub total_runes: usize,
}

impl ItemIndex {
    pub fn insert(&mut self, name: String, entry: ItemIndexEntry) {
        self.items.insert(name, entry);
        self.total_items = self.items.len();
    }
}

impl RuneIndex {
    pub fn insert(&mut self, name: String, entry: RuneIndexEntry) {
        self.runes.insert(name, entry);
        self.total_runes = self.runes.len();
    }
}

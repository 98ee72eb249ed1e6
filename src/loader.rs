// src/loader.rs
//! Read side of the organized layout: index-driven item and rune lookups and
//! champions with their details re-attached.
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::config::options::DataDirs;
use crate::core::sanitize::file_slug;
use crate::model::{
    BuildCategory, Champion, Item, ItemIndex, ItemIndexEntry, Rune, RuneIndex, RuneIndexEntry,
};
use crate::store;

const MISSING: &str = "Details not found";

pub struct DataLoader {
    dirs: DataDirs,
    items: ItemIndex,
    runes: RuneIndex,
}

impl DataLoader {
    /// Missing or unreadable indexes load as empty.
    pub fn new(dirs: DataDirs) -> Self {
        let items = store::read_json(&dirs.item_index()).unwrap_or_else(|e| {
            logd!("item index: {e}");
            ItemIndex::default()
        });
        let runes = store::read_json(&dirs.rune_index()).unwrap_or_else(|e| {
            logd!("rune index: {e}");
            RuneIndex::default()
        });
        Self { dirs, items, runes }
    }

    fn item_file(&self, name: &str) -> PathBuf {
        match self.items.items.get(name) {
            Some(e) => self.dirs.items().join(&e.file),
            None => store::item_path(&self.dirs.items(), name),
        }
    }

    fn rune_file(&self, name: &str) -> PathBuf {
        match self.runes.runes.get(name) {
            Some(e) => self.dirs.runes().join(&e.file),
            None => store::item_path(&self.dirs.runes(), name),
        }
    }

    pub fn get_item(&self, name: &str) -> Option<Item> {
        store::read_json(&self.item_file(name)).ok()
    }

    pub fn get_rune(&self, name: &str) -> Option<Rune> {
        store::read_json(&self.rune_file(name)).ok()
    }

    pub fn get_champion(&self, name: &str) -> Option<Champion> {
        let path = self.dirs.clean_champions().join(format!("{}.json", file_slug(name)));
        store::read_json(&path).ok()
    }

    fn item_or_stub(&self, name: &str) -> Item {
        self.get_item(name).unwrap_or_else(|| {
            let mut stub = Item::named(name);
            stub.extra.insert(s!("error"), Value::from(MISSING));
            stub
        })
    }

    fn rune_or_stub(&self, name: &str) -> Rune {
        self.get_rune(name).unwrap_or_else(|| {
            let mut stub = Rune::named(name);
            stub.extra.insert(s!("error"), Value::from(MISSING));
            stub
        })
    }

    /// The clean champion with `_detailed` lists rebuilt from `items/` and
    /// `runes/`. Unknown names get `{"name", "error": "Details not found"}`.
    pub fn get_champion_with_details(&self, name: &str) -> Option<Champion> {
        let mut champ = self.get_champion(name)?;
        let b = &mut champ.builds;
        for cat in BuildCategory::ALL {
            let Some(names) = b.list(cat).filter(|l| !l.is_empty()).cloned() else { continue };
            *b.detailed_mut(cat) = Some(names.iter().map(|n| self.item_or_stub(n)).collect());
        }
        if let Some(names) = b.example_build.clone().filter(|l| !l.is_empty()) {
            b.example_build_detailed = Some(names.iter().map(|n| self.item_or_stub(n)).collect());
        }
        for lane in b.lane_specific.iter_mut().flat_map(|m| m.values_mut()) {
            for cat in BuildCategory::ALL {
                let names = lane.list(cat).clone();
                if !names.is_empty() {
                    *lane.detailed_mut(cat) = Some(names.iter().map(|n| self.item_or_stub(n)).collect());
                }
            }
        }

        let r = &mut champ.runes;
        if !r.primary.keystone.is_empty() {
            r.primary.keystone_detailed = self.get_rune(&r.primary.keystone);
        }
        r.primary.runes_detailed = Some(r.primary.runes.iter().map(|n| self.rune_or_stub(n)).collect());
        r.secondary.runes_detailed = Some(r.secondary.runes.iter().map(|n| self.rune_or_stub(n)).collect());
        Some(champ)
    }

    pub fn list_items(&self, category: Option<&str>) -> BTreeMap<&str, &ItemIndexEntry> {
        self.items
            .items
            .iter()
            .filter(|(_, e)| category.is_none_or(|c| e.category == c))
            .map(|(n, e)| (n.as_str(), e))
            .collect()
    }

    pub fn list_runes(&self, tree: Option<&str>) -> BTreeMap<&str, &RuneIndexEntry> {
        self.runes
            .runes
            .iter()
            .filter(|(_, e)| tree.is_none_or(|t| e.tree == t))
            .map(|(n, e)| (n.as_str(), e))
            .collect()
    }

    /// Case-insensitive substring match on item names.
    pub fn search_items(&self, query: &str) -> BTreeMap<&str, &ItemIndexEntry> {
        let q = query.to_lowercase();
        self.items
            .items
            .iter()
            .filter(|(n, _)| n.to_lowercase().contains(&q))
            .map(|(n, e)| (n.as_str(), e))
            .collect()
    }
}

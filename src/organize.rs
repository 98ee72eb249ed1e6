// src/organize.rs
//! Splits enhanced champion files into shared `items/` and `runes/` records
//! plus lean champion files in `champions_clean/` that keep only names.
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::consts::{CHAMPION_LIST_FILE, MASTER_FILE};
use crate::config::options::DataDirs;
use crate::core::sanitize::file_slug;
use crate::error::Result;
use crate::model::{Champion, Item, Rune};
use crate::store;

const SUFFIXES: &[&str] = &["_complete_data_enhanced.json", "_data_enhanced.json", "_enhanced.json", "_data.json"];

/// `ahri_data_enhanced.json` → `ahri`.
pub fn champion_name_from_file(file_name: &str) -> String {
    SUFFIXES
        .iter()
        .find_map(|s| file_name.strip_suffix(s))
        .unwrap_or_else(|| file_name.trim_end_matches(".json"))
        .to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub champions: usize,
    pub items: usize,
    pub runes: usize,
    pub errors: usize,
}

pub struct Organizer {
    dirs: DataDirs,
    include_data: bool,
}

impl Organizer {
    pub fn new(dirs: DataDirs) -> Self {
        Self { dirs, include_data: false }
    }

    /// Also take plain `*_data.json` batch output.
    pub fn include_data(mut self, yes: bool) -> Self {
        self.include_data = yes;
        self
    }

    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        Ok(store::json_files(&self.dirs.champions())?
            .into_iter()
            .filter(|p| {
                let name = store::file_name_of(p);
                if name == MASTER_FILE || name == CHAMPION_LIST_FILE {
                    return false;
                }
                name.ends_with("_enhanced.json") || (self.include_data && name.ends_with("_data.json"))
            })
            .collect())
    }

    pub fn run(&self) -> Result<OrganizeSummary> {
        let files = self.source_files()?;
        logf!("Found {} champion files to organize", files.len());

        let mut sum = OrganizeSummary::default();
        let mut items: BTreeMap<String, Item> = BTreeMap::new();
        let mut runes: BTreeMap<String, Rune> = BTreeMap::new();
        let clean_dir = self.dirs.clean_champions();

        for path in files {
            let mut champ: Champion = match store::read_json(&path) {
                Ok(c) => c,
                Err(e) => {
                    loge!("{e}");
                    sum.errors += 1;
                    continue;
                }
            };
            // First record per name wins, so a shared item keeps its main-build copy.
            for item in champ.builds.all_detailed().filter(|i| !i.name.trim().is_empty()) {
                items.entry(item.name.clone()).or_insert_with(|| item.clone());
            }
            for rune in champ.runes.detailed().into_iter().filter(|r| !r.name.trim().is_empty()) {
                runes.insert(rune.name.clone(), rune.clone());
            }
            champ.builds.strip_detailed();
            champ.runes.strip_detailed();

            let name = file_slug(&champion_name_from_file(&store::file_name_of(&path)));
            store::write_json(&clean_dir.join(format!("{name}.json")), &champ)?;
            sum.champions += 1;
        }

        let (items_dir, runes_dir) = (self.dirs.items(), self.dirs.runes());
        for item in items.values() {
            store::write_json(&store::item_path(&items_dir, &item.name), item)?;
        }
        for rune in runes.values() {
            store::write_json(&store::item_path(&runes_dir, &rune.name), rune)?;
        }
        sum.items = items.len();
        sum.runes = runes.len();
        if sum.items > 0 {
            store::refresh_item_index(&items_dir)?;
        }
        if sum.runes > 0 {
            store::refresh_rune_index(&runes_dir)?;
        }
        logf!("Organized {} champions, {} items, {} runes", sum.champions, sum.items, sum.runes);
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_files() {
        assert_eq!(champion_name_from_file("ahri_enhanced.json"), "ahri");
        assert_eq!(champion_name_from_file("ahri_data_enhanced.json"), "ahri");
        assert_eq!(champion_name_from_file("lee_sin_data.json"), "lee_sin");
        assert_eq!(champion_name_from_file("misc.json"), "misc");
    }
}

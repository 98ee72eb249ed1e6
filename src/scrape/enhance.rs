// src/scrape/enhance.rs
//! Live item enrichment for scraped champions.
//!
//! Build lists come off champion pages as bare names. The enhancer looks each
//! name up on the items page (one fetch per run, cached), sorts the names into
//! build slots using what it found, and attaches a `_detailed` record for every
//! name. Names that cannot be found get a stand-in record, loaded from
//! `items/` when a saved copy exists.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::catalog::{Catalog, Slot};
use crate::config::options::{BatchOptions, DataDirs, NetOptions};
use crate::core::net::{pause, retry_with_backoff, Fetch};
use crate::core::sanitize::clean_item_name;
use crate::error::{Error, Result};
use crate::model::{BuildCategory, Builds, Champion, Item, Rune};
use crate::store;

use super::items::ItemScraper;
use super::report::{success_rate, timestamp, ChampionFailure, ErrorReport, FailedItem};

const STARTING_MAX_COST: u64 = 500;
const CORE_MIN_COST: u64 = 2500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceStats {
    pub success: usize,
    pub failed: usize,
    pub cached: usize,
}

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Spellings to try when an item is not found under its own name.
/// Deduplicated, original excluded, in a fixed order.
pub fn name_variations(name: &str) -> Vec<String> {
    let mut v = vec![
        name.replace(['\'', '\u{2019}'], ""),
        name.replace('-', " "),
        name.replace(' ', "-"),
    ];
    if name.contains("Enchant") {
        let base = name.replace("Enchant", "").trim().to_string();
        if !base.is_empty() {
            v.push(base);
        }
    }
    if name.contains("'s") {
        v.push(name.replace("'s", "s"));
        v.push(name.replace("'s", ""));
    }
    let mut out: Vec<String> = Vec::new();
    for s in v {
        if s != name && !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

/// Slot for an item, using its live record when there is one.
pub fn slot_for(catalog: &Catalog, name: &str, data: Option<&Item>) -> Slot {
    let keyword = catalog.keyword_slot(name);
    let Some(item) = data else {
        return keyword.unwrap_or(Slot::Core);
    };
    if keyword == Some(Slot::Enchant) {
        return Slot::Enchant;
    }

    let category = item.category.as_deref().unwrap_or("").to_lowercase();
    let cost = item.cost_value().unwrap_or(0);
    let moves = item.stats.as_ref().is_some_and(|s| s.contains_key("movement_speed"));

    if keyword == Some(Slot::Boots) || category == "boots" || moves {
        Slot::Boots
    } else if keyword == Some(Slot::Starting)
        || matches!(category.as_str(), "starting" | "basic" | "consumable")
        || cost <= STARTING_MAX_COST
    {
        Slot::Starting
    } else if cost >= CORE_MIN_COST || matches!(category.as_str(), "legendary" | "mythic" | "epic") {
        Slot::Core
    } else {
        // Components, intermediates and anything cheaper.
        Slot::Situational
    }
}

/// Stats with null/zero entries dropped and bare numbers wrapped as flat stats.
fn normalize_stats(stats: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut out = Map::new();
    for (k, v) in stats.into_iter().flatten() {
        match v {
            Value::Null => {}
            Value::Number(n) if n.as_f64() == Some(0.0) => {}
            Value::Object(_) => {
                out.insert(k.clone(), v.clone());
            }
            other => {
                out.insert(k.clone(), json!({ "value": other, "type": "flat" }));
            }
        }
    }
    out
}

/// Fill the fields a detailed record must carry.
fn complete(mut item: Item, name: &str) -> Item {
    if item.name.is_empty() {
        item.name = s!(name);
    }
    item.stats = Some(normalize_stats(item.stats.as_ref()));
    let cost = item.cost_value().unwrap_or(0);
    item.set_cost(cost);
    item.passive.get_or_insert_default();
    item.active.get_or_insert_default();
    item.description.get_or_insert_default();
    item.category.get_or_insert_with(|| s!("unknown"));
    item.tier.get_or_insert_with(|| s!("Unknown"));
    item.tips.get_or_insert_default();
    item
}

/// Detailed rune record from the catalog, or a placeholder.
pub fn rune_record(catalog: &Catalog, name: &str) -> Rune {
    let Some(f) = catalog.rune(name) else { return Rune::placeholder(name) };
    Rune {
        name: s!(name),
        tree: f.tree.clone(),
        kind: f.kind.clone(),
        description: f.description.clone(),
        stats: f.stats.clone(),
        cooldown: f.cooldown.clone(),
        tier: f.tier.clone(),
        extra: Map::new(),
    }
}

pub struct Enhancer<'a, F: Fetch> {
    items: ItemScraper<'a, F>,
    catalog: &'a Catalog,
    opts: BatchOptions,
    dirs: DataDirs,
    page: Mutex<Option<String>>,
    cache: Mutex<HashMap<String, Item>>,
    stats: Mutex<EnhanceStats>,
    failed: Mutex<Vec<FailedItem>>,
    champion_failures: Mutex<Vec<ChampionFailure>>,
}

impl<'a, F: Fetch> Enhancer<'a, F> {
    pub fn new(fetch: &'a F, net: NetOptions, opts: BatchOptions, dirs: DataDirs) -> Self {
        Self {
            items: ItemScraper::new(fetch, net, dirs.items()),
            catalog: Catalog::get(),
            opts,
            dirs,
            page: Mutex::new(None),
            cache: Mutex::new(HashMap::new()),
            stats: Mutex::new(EnhanceStats::default()),
            failed: Mutex::new(Vec::new()),
            champion_failures: Mutex::new(Vec::new()),
        }
    }

    pub fn stats(&self) -> EnhanceStats {
        *locked(&self.stats)
    }

    pub fn failed_items(&self) -> Vec<FailedItem> {
        locked(&self.failed).clone()
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::new(self.stats(), self.failed_items(), locked(&self.champion_failures).clone())
    }

    fn items_page(&self) -> Result<String> {
        let mut page = locked(&self.page);
        if let Some(html) = page.as_ref() {
            return Ok(html.clone());
        }
        let html = self.items.items_html()?;
        *page = Some(html.clone());
        Ok(html)
    }

    fn find(&self, name: &str) -> Result<Option<(Item, Option<String>)>> {
        let html = self.items_page()?;
        if let Some(item) = self.items.find_in(&html, name)? {
            return Ok(Some((item, None)));
        }
        let cache = locked(&self.cache).keys().cloned().collect::<Vec<_>>();
        for alt in name_variations(name) {
            if cache.contains(&alt) {
                continue;
            }
            if let Some(item) = self.items.find_in(&html, &alt)? {
                return Ok(Some((item, Some(alt))));
            }
        }
        Ok(None)
    }

    fn record_failure(&self, name: &str, reason: String) {
        let f = FailedItem::new(name, reason, self.opts.max_item_retries);
        logw!("Failed to scrape '{name}': {}", f.reason);
        f.append_to(&self.dirs.logs());
        locked(&self.stats).failed += 1;
        locked(&self.failed).push(f);
    }

    /// Live record for one item: cache, then the items page under the name and
    /// its variations, retrying with backoff on errors.
    pub fn item_data(&self, name: &str) -> Result<Option<Item>> {
        if let Some(hit) = locked(&self.cache).get(name).cloned() {
            locked(&self.stats).cached += 1;
            return Ok(Some(hit));
        }

        let retries = self.opts.max_item_retries;
        match retry_with_backoff(retries, self.opts.item_retry_base_ms, |_| self.find(name)) {
            Ok(Some((item, alt))) => {
                {
                    let mut cache = locked(&self.cache);
                    cache.insert(s!(name), item.clone());
                    if let Some(alt) = alt {
                        cache.insert(alt, item.clone());
                    }
                }
                locked(&self.stats).success += 1;
                pause(self.opts.item_pause_ms);
                Ok(Some(item))
            }
            Ok(None) => {
                self.record_failure(name, s!("No data returned from scraper after retries"));
                Ok(None)
            }
            Err(e) => {
                let what = match &e {
                    Error::Http(_) | Error::Status { .. } => "Network error",
                    _ => "Scraping error",
                };
                self.record_failure(name, format!("{what} after {retries} retries: {e}"));
                Err(e)
            }
        }
    }

    fn fetch_all(&self, names: &[String]) -> (HashMap<String, Item>, usize) {
        let mut out = HashMap::new();
        let mut errors = 0;
        for (i, name) in names.iter().enumerate() {
            logd!("[{}/{}] fetching {name}", i + 1, names.len());
            match self.item_data(name) {
                Ok(Some(item)) => {
                    let mut item = complete(item, name);
                    item.extra.insert(s!("scraped_at"), Value::from(timestamp()));
                    item.extra.insert(s!("source"), Value::from("wr-meta.com"));
                    out.insert(name.clone(), item);
                }
                Ok(None) => {}
                Err(_) => errors += 1,
            }
        }
        (out, errors)
    }

    /// Re-sort every build name into the five slots, first occurrence order.
    pub fn categorize(&self, builds: &mut Builds, enhanced: &HashMap<String, Item>) {
        let mut names: Vec<String> = Vec::new();
        for raw in builds.all_item_names() {
            let n = clean_item_name(&raw);
            if !n.is_empty() && !names.contains(&n) {
                names.push(n);
            }
        }

        let mut slots: HashMap<Slot, Vec<String>> = HashMap::new();
        let mut with_data = 0;
        for name in &names {
            let data = enhanced.get(name);
            if data.is_some() {
                with_data += 1;
            }
            slots.entry(slot_for(self.catalog, name, data)).or_default().push(name.clone());
        }

        let mut take = |slot: Slot| Some(slots.remove(&slot).unwrap_or_default());
        builds.starting_items = take(Slot::Starting);
        builds.core_items = take(Slot::Core);
        builds.boots = take(Slot::Boots);
        builds.situational_items = take(Slot::Situational);
        builds.enchants = take(Slot::Enchant);

        builds.extra.insert(s!("categorization_metadata"), json!({
            "enhanced_items": with_data,
            "fallback_items": names.len() - with_data,
            "total_items": names.len(),
            "categorization_timestamp": timestamp(),
            "categorization_method": "real_time_data_enhanced",
        }));
        logd!("categorized {} items ({with_data} with live data)", names.len());
    }

    /// Saved copy from `items/`, else a minimal stand-in.
    pub fn fallback_item(&self, name: &str, reason: &str) -> Item {
        let path: PathBuf = store::item_path(&self.dirs.items(), name);
        if path.exists() {
            match store::read_json::<Item>(&path) {
                Ok(mut item) => {
                    logd!("using cached data for {name}");
                    item.extra.insert(s!("fallback"), Value::Bool(true));
                    item.extra.insert(s!("fallback_reason"), Value::from(format!("Using cached data: {reason}")));
                    item.extra.insert(s!("last_updated"), Value::from("cached"));
                    return item;
                }
                Err(e) => logd!("could not load cached data for {name}: {e}"),
            }
        }
        let mut item = complete(Item::named(name), name);
        item.description = Some(format!("Real-time data for {name} could not be fetched. Reason: {reason}"));
        item.extra.insert(s!("fallback"), Value::Bool(true));
        item.extra.insert(s!("fallback_reason"), Value::from(reason));
        item.extra.insert(s!("last_updated"), Value::from("unavailable"));
        item
    }

    fn detailed_list(
        &self,
        names: &[String],
        key: &str,
        lane: Option<&str>,
        enhanced: &HashMap<String, Item>,
        counts: &mut (usize, usize),
    ) -> Vec<Item> {
        names
            .iter()
            .map(|raw| clean_item_name(raw))
            .filter(|name| !name.is_empty())
            .map(|name| {
                let mut item = match enhanced.get(&name) {
                    Some(found) => {
                        counts.0 += 1;
                        let mut item = found.clone();
                        item.extra.insert(s!("real_time_data"), Value::Bool(true));
                        item.extra.insert(s!("last_updated"), Value::from(timestamp()));
                        item.extra.insert(s!("data_source"), Value::from("wr-meta.com"));
                        item
                    }
                    None => {
                        counts.1 += 1;
                        let reason = match lane {
                            Some(lane) => format!("Item data could not be fetched for {lane} lane build"),
                            None => s!("Item data could not be fetched during champion processing"),
                        };
                        self.fallback_item(&name, &reason)
                    }
                };
                item.extra.insert(s!("category_assigned"), Value::from(key));
                if let Some(lane) = lane {
                    item.extra.insert(s!("lane_specific"), Value::from(lane));
                }
                item
            })
            .collect()
    }

    /// Attach `_detailed` siblings for every non-empty list, per-lane
    /// category lists included.
    pub fn attach_details(&self, builds: &mut Builds, enhanced: &HashMap<String, Item>) {
        let mut counts = (0, 0);
        for cat in BuildCategory::ALL {
            let names = builds.list(cat).cloned().unwrap_or_default();
            if names.is_empty() {
                continue;
            }
            *builds.detailed_mut(cat) = Some(self.detailed_list(&names, cat.key(), None, enhanced, &mut counts));
        }
        if let Some(names) = builds.enchants.clone().filter(|n| !n.is_empty()) {
            builds.enchants_detailed = Some(self.detailed_list(&names, "enchants", None, enhanced, &mut counts));
        }
        if let Some(names) = builds.example_build.clone().filter(|n| !n.is_empty()) {
            builds.example_build_detailed = Some(self.detailed_list(&names, "example_build", None, enhanced, &mut counts));
        }
        for (lane, build) in builds.lane_specific.iter_mut().flatten() {
            for cat in BuildCategory::ALL {
                let names = build.list(cat).clone();
                if names.is_empty() {
                    continue;
                }
                *build.detailed_mut(cat) = Some(self.detailed_list(&names, cat.key(), Some(lane.as_str()), enhanced, &mut counts));
            }
        }

        let (live, fallback) = counts;
        builds.extra.insert(s!("detailed_items_metadata"), json!({
            "real_time_items": live,
            "fallback_items": fallback,
            "total_detailed_items": live + fallback,
            "real_time_success_rate": success_rate(live, live + fallback),
            "processing_timestamp": timestamp(),
        }));
    }

    /// Keystone and rune records from the catalog.
    pub fn attach_runes(&self, champ: &mut Champion) {
        let page = &mut champ.runes;
        if !page.primary.keystone.is_empty() {
            page.primary.keystone_detailed = Some(rune_record(self.catalog, &page.primary.keystone));
        }
        if !page.primary.runes.is_empty() {
            page.primary.runes_detailed = Some(page.primary.runes.iter().map(|r| rune_record(self.catalog, r)).collect());
        }
        if !page.secondary.runes.is_empty() {
            page.secondary.runes_detailed = Some(page.secondary.runes.iter().map(|r| rune_record(self.catalog, r)).collect());
        }
    }

    /// Enrich one champion in place. Item failures never fail the champion.
    pub fn enhance(&self, champ: &mut Champion) {
        let name = champ.champion.name.clone();
        let mut names: Vec<String> = Vec::new();
        for raw in champ.builds.all_item_names().into_iter().chain(champ.builds.lane_item_names()) {
            let n = clean_item_name(&raw);
            if !n.is_empty() && !names.contains(&n) {
                names.push(n);
            }
        }
        if names.is_empty() {
            logd!("{name}: no items found in builds");
            return;
        }

        logf!("Enhancing {name} with live data for {} items", names.len());
        let (enhanced, errors) = self.fetch_all(&names);
        if errors == names.len() {
            let error = s!("no item data could be fetched");
            logw!("Champion item enhancement failed for {name}: {error}");
            locked(&self.champion_failures).push(ChampionFailure { champion: name.clone(), error, timestamp: timestamp() });
            champ.extra.insert(s!("processing_metadata"), json!({
                "partial_processing": true,
                "item_enhancement_failed": true,
                "fallback_data_used": true,
                "processing_timestamp": timestamp(),
            }));
        }

        self.categorize(&mut champ.builds, &enhanced);
        self.attach_details(&mut champ.builds, &enhanced);
        self.attach_runes(champ);

        champ.extra.insert(s!("real_time_enhancement"), json!({
            "enhanced_items_count": enhanced.len(),
            "total_items_found": names.len(),
            "enhancement_timestamp": timestamp(),
            "success_rate": success_rate(enhanced.len(), names.len()),
        }));
        logf!("Enhanced {}/{} items with live data", enhanced.len(), names.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variations_cover_possessives_and_enchants() {
        let v = name_variations("Rabadon's Deathcap");
        assert!(v.contains(&s!("Rabadons Deathcap")));
        assert!(v.contains(&s!("Rabadon's-Deathcap")));
        assert!(v.contains(&s!("Rabadon Deathcap")));
        assert!(!v.contains(&s!("Rabadon's Deathcap")));

        let v = name_variations("Stasis Enchant");
        assert!(v.contains(&s!("Stasis")));
    }

    #[test]
    fn slots_with_and_without_data() {
        let c = Catalog::get();
        assert_eq!(slot_for(c, "Unknown Thing", None), Slot::Core);
        assert_eq!(slot_for(c, "Quicksilver Enchant", None), Slot::Enchant);

        let mut cheap = Item::named("Cheap Thing");
        cheap.set_cost(400);
        assert_eq!(slot_for(c, "Cheap Thing", Some(&cheap)), Slot::Starting);

        let mut mid = Item::named("Mid Thing");
        mid.set_cost(1600);
        assert_eq!(slot_for(c, "Mid Thing", Some(&mid)), Slot::Situational);

        let mut big = Item::named("Big Thing");
        big.set_cost(3000);
        assert_eq!(slot_for(c, "Big Thing", Some(&big)), Slot::Core);

        let mut fast = Item::named("Fast Thing");
        fast.set_cost(900);
        fast.stats = Some(serde_json::from_value(json!({"movement_speed": {"value": 40, "type": "flat"}})).unwrap());
        assert_eq!(slot_for(c, "Fast Thing", Some(&fast)), Slot::Boots);
    }

    #[test]
    fn stats_are_normalized() {
        let raw: Map<String, Value> = serde_json::from_value(json!({
            "attack_damage": 50,
            "armor": 0,
            "health": null,
            "ability_haste": {"value": 15, "type": "flat"}
        }))
        .unwrap();
        let out = normalize_stats(Some(&raw));
        assert_eq!(out.len(), 2);
        assert_eq!(out["attack_damage"], json!({"value": 50, "type": "flat"}));
    }

    #[test]
    fn unknown_rune_gets_placeholder() {
        let r = rune_record(Catalog::get(), "Made Up Rune");
        assert!(r.is_placeholder());
        let r = rune_record(Catalog::get(), "Electrocute");
        assert_eq!(r.tree.as_deref(), Some("Domination"));
    }
}

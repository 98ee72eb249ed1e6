// tests/patchers.rs
mod common;

use serde_json::json;
use tempfile::tempdir;
use wr_scrape::catalog::Catalog;
use wr_scrape::config::consts::GENERIC_DESCRIPTION;
use wr_scrape::config::options::DataDirs;
use wr_scrape::patch;

use common::{read, snapshot, write};

const RABADON_DESCRIPTION: &str = "High-tier AP item providing massive Ability Power. The Magical Opus passive amplifies all your AP by 40%, making it the ultimate damage multiplier for mages. Best built when you already have some AP items to maximize the percentage bonus.";

#[test]
fn details_fill_rabadon_description_and_tips() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let path = dirs.items().join("rabadons_deathcap.json");
    write(&path, &json!({
        "name": "Rabadon's Deathcap",
        "stats": {"ability_power": {"value": 120, "type": "flat"}},
        "description": "Details for Rabadon's Deathcap...",
    }));

    let sum = patch::details::patch(&dirs.items(), Catalog::get()).unwrap();
    assert_eq!(sum.changed, 1);

    let v = read(&path);
    assert_eq!(v["description"], RABADON_DESCRIPTION);
    let tips = v["tips"].as_array().unwrap();
    assert_eq!(tips.len(), 5);
    assert_eq!(tips[0], "Build after other AP items to maximize the 40% bonus effect");
    // untouched fields survive
    assert_eq!(v["stats"]["ability_power"]["value"], 120);
}

#[test]
fn patched_files_keep_key_order_and_nulls() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let path = dirs.items().join("rabadons_deathcap.json");
    write(&path, &json!({
        "name": "Rabadon's Deathcap",
        "description": "Details for Rabadon's Deathcap...",
        "tips": [],
        "image": "rabadon.png",
        "cost": 3600,
        "active": null,
    }));

    let sum = patch::details::patch(&dirs.items(), Catalog::get()).unwrap();
    assert_eq!(sum.changed, 1);

    let v = read(&path);
    let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["name", "description", "tips", "image", "cost", "active"]);
    assert!(v["active"].is_null());
    assert_eq!(v["description"], RABADON_DESCRIPTION);
}

#[test]
fn running_every_patcher_twice_changes_nothing_the_second_time() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    write(&dirs.items().join("rabadons_deathcap.json"), &json!({
        "name": "Rabadon's Deathcap",
        "description": "",
    }));
    write(&dirs.items().join("hullbreaker.json"), &json!({
        "name": "Hullbreaker",
        "description": GENERIC_DESCRIPTION,
        "stats": {},
    }));
    write(&dirs.items().join("mystery_blade.json"), &json!({
        "name": "Mystery Blade",
        "description": GENERIC_DESCRIPTION,
        "stats": {"attack_damage": {"value": 30, "type": "flat"}},
        "cost": 1300,
    }));
    write(&dirs.runes().join("electrocute.json"), &json!({
        "name": "Electrocute",
        "tree": "Unknown",
    }));

    let first = patch::run_all(&dirs, Catalog::get()).unwrap();
    assert!(first.iter().any(|(_, s)| s.changed > 0));
    let before = snapshot(tmp.path());

    let second = patch::run_all(&dirs, Catalog::get()).unwrap();
    assert!(second.iter().all(|(_, s)| s.changed == 0), "{second:?}");
    assert_eq!(snapshot(tmp.path()), before);

    let hull = read(&dirs.items().join("hullbreaker.json"));
    assert_eq!(hull["cost"], 3200);
    assert!(!hull["description"].as_str().unwrap().contains("..."));
    let rune = read(&dirs.runes().join("electrocute.json"));
    assert_eq!(rune["tree"], "Domination");
}

#[test]
fn items_missing_from_the_catalog_are_left_alone() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let path = dirs.items().join("homemade_item.json");
    write(&path, &json!({
        "name": "Homemade Item",
        "description": "Short.",
        "custom_field": [1, 2, 3],
    }));
    let bytes = std::fs::read(&path).unwrap();

    let catalog = Catalog::get();
    let details = patch::details::patch(&dirs.items(), catalog).unwrap();
    let stats = patch::stats::patch(&dirs.items(), catalog).unwrap();
    assert_eq!(details.changed + stats.changed, 0);
    assert_eq!(details.skipped, 1);
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

#[test]
fn disputed_values_are_never_written() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let path = dirs.items().join("rabadons_deathcap.json");
    write(&path, &json!({"name": "Rabadon's Deathcap", "cost": 0}));

    patch::stats::patch(&dirs.items(), Catalog::get()).unwrap();
    assert_eq!(read(&path)["cost"], 0);
}

// tests/organize_loader.rs
mod common;

use serde_json::json;
use tempfile::tempdir;
use wr_scrape::config::options::{BatchOptions, DataDirs, NetOptions};
use wr_scrape::core::sanitize::file_slug;
use wr_scrape::loader::DataLoader;
use wr_scrape::organize::Organizer;
use wr_scrape::scrape::BatchScraper;

use common::{read, write, FakeSite, AHRI_PAGE, GAREN_LANES_PAGE, ITEMS_PAGE};

#[test]
fn slugs_are_canonical() {
    assert_eq!(file_slug("Rabadon's Deathcap"), "rabadons_deathcap");
    assert_eq!(file_slug("Mercury's Treads"), "mercurys_treads");
    assert_eq!(file_slug("Legend: Alacrity"), "legend_alacrity");
    assert_eq!(file_slug("Kai'Sa"), "kaisa");
    assert_eq!(file_slug("  Dr. Mundo "), "dr._mundo");
}

#[test]
fn scrape_organize_and_load_back() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let site = FakeSite::new()
        .page("https://wr-meta.com/1-ahri.html", AHRI_PAGE)
        .page("https://wr-meta.com/items", ITEMS_PAGE);
    let scraper = BatchScraper::new(
        &site,
        NetOptions::default().without_pauses(),
        BatchOptions::default().without_pauses(),
        dirs.clone(),
    );
    scraper.scrape_single("https://wr-meta.com/1-ahri.html").unwrap();

    let sum = Organizer::new(dirs.clone()).run().unwrap();
    assert_eq!(sum.champions, 1);
    assert_eq!(sum.errors, 0);
    assert!(sum.items >= 2);
    assert!(sum.runes >= 1);

    let clean = read(&dirs.clean_champions().join("ahri.json"));
    assert!(clean["builds"]["core_items"].as_array().unwrap().len() >= 1);
    assert!(clean["builds"].get("core_items_detailed").is_none());
    assert!(dirs.items().join("rabadons_deathcap.json").exists());
    assert!(dirs.item_index().exists());

    let loader = DataLoader::new(dirs.clone());
    assert_eq!(loader.get_item("Rabadon's Deathcap").unwrap().cost_value(), Some(3600));
    assert!(loader.get_rune("Electrocute").is_some());
    assert!(loader.search_items("deathcap").contains_key("Rabadon's Deathcap"));

    let full = loader.get_champion_with_details("Ahri").unwrap();
    let core = full.builds.core_items_detailed.unwrap();
    assert!(core.iter().all(|i| !i.extra.contains_key("error")));
    assert_eq!(full.runes.primary.keystone_detailed.unwrap().name, "Electrocute");

    // a second organize pass rewrites nothing
    let before = common::snapshot(tmp.path());
    Organizer::new(dirs.clone()).run().unwrap();
    assert_eq!(common::snapshot(tmp.path()), before);
}

#[test]
fn unknown_build_items_load_as_stubs() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    write(&dirs.clean_champions().join("garen.json"), &json!({
        "champion": {"name": "Garen"},
        "builds": {"core_items": ["Ghost Item"]},
    }));

    let loader = DataLoader::new(dirs);
    assert!(loader.get_champion("Nobody").is_none());
    let garen = loader.get_champion_with_details("Garen").unwrap();
    let core = garen.builds.core_items_detailed.unwrap();
    assert_eq!(core[0].name, "Ghost Item");
    assert_eq!(core[0].extra["error"], "Details not found");
    assert!(loader.list_items(None).is_empty());
}

#[test]
fn lane_builds_are_enhanced_organized_and_reloaded() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let site = FakeSite::new()
        .page("https://wr-meta.com/2-garen.html", GAREN_LANES_PAGE)
        .page("https://wr-meta.com/items", ITEMS_PAGE);
    let scraper = BatchScraper::new(
        &site,
        NetOptions::default().without_pauses(),
        BatchOptions::default().without_pauses(),
        dirs.clone(),
    );
    let (champ, _) = scraper.scrape_single("https://wr-meta.com/2-garen.html").unwrap();

    let lanes = champ.builds.lane_specific.as_ref().unwrap();
    let baron = lanes["Baron Lane"].core_items_detailed.as_ref().unwrap();
    assert_eq!(baron[0].name, "Rabadon's Deathcap");
    assert_eq!(baron[0].cost_value(), Some(3600));
    assert_eq!(baron[0].extra["lane_specific"], "Baron Lane");
    assert_eq!(baron[0].extra["category_assigned"], "core_items");
    let boots = lanes["Baron Lane"].boots_detailed.as_ref().unwrap();
    assert_eq!(boots[0].name, "Plated Steelcaps");

    let jungle = lanes["Jungle"].core_items_detailed.as_ref().unwrap();
    assert_eq!(jungle[0].name, "Jungle Only Blade");
    assert_eq!(jungle[0].extra["fallback"], true);
    assert!(jungle[0].extra["fallback_reason"].as_str().unwrap().contains("Jungle lane build"));

    Organizer::new(dirs.clone()).run().unwrap();
    let clean = read(&dirs.clean_champions().join("garen.json"));
    let jungle = &clean["builds"]["lane_specific"]["Jungle"];
    assert_eq!(jungle["core_items"][0], "Jungle Only Blade");
    assert!(jungle.get("core_items_detailed").is_none());
    // shared items keep the main build copy
    let rab = read(&dirs.items().join("rabadons_deathcap.json"));
    assert!(rab.get("lane_specific").is_none());

    let full = DataLoader::new(dirs).get_champion_with_details("Garen").unwrap();
    let lanes = full.builds.lane_specific.unwrap();
    let baron = lanes["Baron Lane"].core_items_detailed.as_ref().unwrap();
    assert_eq!(baron[0].cost_value(), Some(3600));
}

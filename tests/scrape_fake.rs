// tests/scrape_fake.rs
mod common;

use std::cell::Cell;

use tempfile::tempdir;
use wr_scrape::config::consts::{CHAMPION_LIST_FILE, MASTER_FILE};
use wr_scrape::config::options::{BatchOptions, DataDirs, NetOptions};
use wr_scrape::core::net::retry_with_backoff;
use wr_scrape::progress::NullProgress;
use wr_scrape::scrape::{BatchScraper, ItemScraper, UrlMapper};
use wr_scrape::{Error, Result};

use common::{read, FakeSite, AHRI_PAGE, GAREN_PAGE, ITEMS_PAGE};

const BASE: &str = "https://wr-meta.com";

fn net() -> NetOptions {
    NetOptions::default().without_pauses()
}

fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

#[test]
fn discovery_collects_links_from_index_pages() {
    let site = FakeSite::new()
        .page(&url("/"), r#"<a href="/1-ahri.html">Ahri</a> <a href="https://wr-meta.com/2-garen.html">Garen</a>"#)
        .page(&url("/mages/"), r#"<a href="/1-ahri.html">Ahri</a> <a href="/3-lux.html">Lux</a>"#);
    let mapper = UrlMapper::new(&site, net());

    let urls = mapper.discover();
    assert_eq!(urls, vec![url("/1-ahri.html"), url("/2-garen.html"), url("/3-lux.html")]);

    let map = mapper.mapping(&urls);
    assert_eq!(map.get("garen"), Some(&url("/2-garen.html")));
}

#[test]
fn search_then_brute_force_find_moved_pages() {
    let site = FakeSite::new()
        .page(&url("/?s=Lux"), r#"<a href="/42-lux.html">Lux</a>"#)
        .page(&url("/42-lux.html"), "lux")
        .page(&url("/305-master-yi.html"), "yi");
    let mapper = UrlMapper::new(&site, net());

    assert_eq!(mapper.search("Lux"), Some(url("/42-lux.html")));
    assert_eq!(mapper.search("Master Yi"), None);
    assert_eq!(mapper.brute_force("Master Yi", 600), Some(url("/305-master-yi.html")));
    assert_eq!(mapper.brute_force("Nobody", 420), None);
}

#[test]
fn sample_validation_assumes_the_rest_when_it_passes() {
    let site = FakeSite::new().page(&url("/1-ahri.html"), "a").page(&url("/2-garen.html"), "g");
    let mapper = UrlMapper::new(&site, net());
    let urls = vec![url("/1-ahri.html"), url("/2-garen.html"), url("/9-gone.html")];

    let v = mapper.validate_all(&urls, 2);
    assert!(v.assumed_rest);
    assert_eq!(v.valid.len(), 3);

    let v = mapper.validate_all(&urls[2..], 1);
    assert!(!v.assumed_rest);
    assert_eq!(v.invalid, vec![url("/9-gone.html")]);
}

#[test]
fn backoff_retries_until_success() {
    let calls = Cell::new(0);
    let out: Result<u32> = retry_with_backoff(3, 0, |attempt| {
        calls.set(calls.get() + 1);
        if attempt < 2 { Err(Error::NotFound(format!("try {attempt}"))) } else { Ok(7) }
    });
    assert_eq!(out.unwrap(), 7);
    assert_eq!(calls.get(), 3);

    let out: Result<u32> = retry_with_backoff(1, 0, |_| Err(Error::Interrupted));
    assert!(matches!(out, Err(Error::Interrupted)));
}

#[test]
fn items_page_is_saved_one_file_per_item() {
    let tmp = tempdir().unwrap();
    let site = FakeSite::new().page(&url("/items"), ITEMS_PAGE);
    let scraper = ItemScraper::new(&site, net(), tmp.path().join("items"));

    let n = scraper.scrape_all(&mut NullProgress).unwrap();
    assert_eq!(n, 2);
    let rab = read(&tmp.path().join("items/rabadons_deathcap.json"));
    assert_eq!(rab["cost"], 3600);
    assert_eq!(rab["stats"]["ability_power"]["value"], 120);

    let one = scraper.scrape_item("Plated Steelcaps").unwrap().unwrap();
    assert_eq!(one.cost_value(), Some(1100));
    assert!(scraper.scrape_item("Not An Item").unwrap().is_none());
}

#[test]
fn batch_scrape_saves_every_champion_and_corrects_moved_urls() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let site = FakeSite::new()
        .page(&url("/1-ahri.html"), AHRI_PAGE)
        .page(&url("/77-garen.html"), GAREN_PAGE);
    let opts = BatchOptions { enhance: false, workers: 2, ..BatchOptions::default() }.without_pauses();
    let scraper = BatchScraper::new(&site, net(), opts, dirs.clone());

    let urls = vec![url("/1-ahri.html"), url("/2-garen.html")];
    let out = scraper.scrape_all(&urls, &mut NullProgress).unwrap();

    assert_eq!(out.champions.len(), 2);
    assert!(out.failed_urls.is_empty());
    assert_eq!(out.corrected_urls.get(&url("/2-garen.html")), Some(&url("/77-garen.html")));
    assert!(!out.interrupted);

    assert!(dirs.champions().join("ahri_data.json").exists());
    assert!(dirs.champions().join("garen_data.json").exists());
    let master = read(&dirs.champions().join(MASTER_FILE));
    assert_eq!(master["ahri"]["champion"]["name"], "Ahri");
    let list = read(&dirs.champions().join(CHAMPION_LIST_FILE));
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Ahri");
}

#[test]
fn one_bad_champion_does_not_stop_the_batch() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let site = FakeSite::new().page(&url("/1-ahri.html"), AHRI_PAGE);
    let opts = BatchOptions { enhance: false, max_retries: 2, ..BatchOptions::default() }.without_pauses();
    let scraper = BatchScraper::new(&site, net(), opts, dirs);

    let gone = url("/500-zzz.html");
    let out = scraper.scrape_all(&[gone.clone(), url("/1-ahri.html")], &mut NullProgress).unwrap();
    assert_eq!(out.champions.len(), 1);
    assert_eq!(out.failed_urls, vec![gone.clone()]);
    assert_eq!(site.hits(&gone), 2);
}

#[test]
fn interrupted_batch_keeps_what_it_has() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let site = FakeSite::new().page(&url("/1-ahri.html"), AHRI_PAGE);
    let opts = BatchOptions { enhance: false, ..BatchOptions::default() }.without_pauses();
    let scraper = BatchScraper::new(&site, net(), opts, dirs.clone());

    scraper.interrupt_flag().store(true, std::sync::atomic::Ordering::Relaxed);
    let out = scraper.scrape_all(&[url("/1-ahri.html")], &mut NullProgress).unwrap();
    assert!(out.interrupted);
    assert!(out.champions.is_empty());
    assert!(dirs.champions().join(MASTER_FILE).exists());
}

#[test]
fn single_champion_is_enhanced_from_the_items_page() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let site = FakeSite::new()
        .page(&url("/1-ahri.html"), AHRI_PAGE)
        .page(&url("/items"), ITEMS_PAGE);
    let opts = BatchOptions::default().without_pauses();
    let scraper = BatchScraper::new(&site, net(), opts, dirs.clone());

    let (champ, path) = scraper.scrape_single(&url("/1-ahri.html")).unwrap();
    assert_eq!(path, dirs.champions().join("ahri_enhanced.json"));
    assert!(champ.extra.contains_key("real_time_enhancement"));

    let core = champ.builds.core_items_detailed.as_ref().unwrap();
    let rab = core.iter().find(|i| i.name == "Rabadon's Deathcap").unwrap();
    assert_eq!(rab.cost_value(), Some(3600));
    // the items page is fetched once per run
    assert_eq!(site.hits(&url("/items")), 1);
    assert!(champ.runes.primary.keystone_detailed.is_some());
}

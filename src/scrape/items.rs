// src/scrape/items.rs
use std::path::PathBuf;

use scraper::Html;

use crate::config::consts::ITEMS_PATH;
use crate::config::options::NetOptions;
use crate::core::net::{pause, Fetch};
use crate::error::Result;
use crate::model::Item;
use crate::progress::Progress;
use crate::specs::item as spec;
use crate::store;

/// Pulls item records off the items page (or a single item page) and saves
/// each one to `items/<file_slug>.json`.
pub struct ItemScraper<'a, F: Fetch> {
    fetch: &'a F,
    net: NetOptions,
    out_dir: PathBuf,
}

impl<'a, F: Fetch> ItemScraper<'a, F> {
    pub fn new(fetch: &'a F, net: NetOptions, out_dir: impl Into<PathBuf>) -> Self {
        Self { fetch, net, out_dir: out_dir.into() }
    }

    /// Raw HTML of the items page.
    pub fn items_html(&self) -> Result<String> {
        let url = self.net.url(ITEMS_PATH);
        logf!("Fetching items from {url}");
        self.fetch.get(&url)
    }

    /// Locate `name` in an already fetched items page and save it.
    pub fn find_in(&self, html: &str, name: &str) -> Result<Option<Item>> {
        let doc = Html::parse_document(html);
        let Some(item) = spec::locate_item(&doc, name)? else { return Ok(None) };
        self.save(&item)?;
        Ok(Some(item))
    }

    fn save(&self, item: &Item) -> Result<PathBuf> {
        let path = store::item_path(&self.out_dir, &item.name);
        store::write_json(&path, item)?;
        logd!("saved {} to {}", item.name, path.display());
        Ok(path)
    }

    /// Every item on the items page. Returns the number saved.
    pub fn scrape_all(&self, progress: &mut dyn Progress) -> Result<usize> {
        let doc = Html::parse_document(&self.items_html()?);
        let items = spec::extract_all(&doc)?;
        logf!("Found {} potential items", items.len());

        progress.begin(items.len());
        let mut saved = 0;
        for item in &items {
            match self.save(item) {
                Ok(_) => {
                    saved += 1;
                    progress.item_done(&item.name, true);
                }
                Err(e) => {
                    loge!("{}: {e}", item.name);
                    progress.item_done(&item.name, false);
                }
            }
            pause(self.net.pause_ms);
        }
        progress.finish();
        logf!("Successfully scraped {saved} items");
        Ok(saved)
    }

    /// One named item, located on the items page. `None` if it is not there.
    pub fn scrape_item(&self, name: &str) -> Result<Option<Item>> {
        match self.find_in(&self.items_html()?, name)? {
            Some(item) => {
                logf!("Successfully scraped {name}");
                Ok(Some(item))
            }
            None => {
                logw!("Could not find {name} on the items page");
                Ok(None)
            }
        }
    }

    /// A single item page.
    pub fn scrape_url(&self, url: &str) -> Result<Option<Item>> {
        let doc = Html::parse_document(&self.fetch.get(&self.net.url(url))?);
        match spec::extract_page_item(&doc)? {
            Some(item) => {
                self.save(&item)?;
                Ok(Some(item))
            }
            None => {
                logw!("Could not extract item data from {url}");
                Ok(None)
            }
        }
    }
}

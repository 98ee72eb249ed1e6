// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use serde_json::Value;
use wr_scrape::core::net::Fetch;
use wr_scrape::{Error, Result};

/// In-memory site. Unknown URLs answer 404 to both GET and HEAD.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| *u == url).count()
    }
}

impl Fetch for FakeSite {
    fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Status { url: url.to_string(), status: 404 })
    }

    fn status(&self, url: &str) -> Result<u16> {
        Ok(if self.pages.contains_key(url) { 200 } else { 404 })
    }
}

pub fn write(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Every file under `dir` with its bytes, sorted by path.
pub fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut out = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        for entry in fs::read_dir(&d).unwrap() {
            let p = entry.unwrap().path();
            if p.is_dir() {
                stack.push(p);
            } else {
                out.push((p.display().to_string(), fs::read(&p).unwrap()));
            }
        }
    }
    out.sort();
    out
}

pub const ITEMS_PAGE: &str = r#"<html><body>
<div class="item-container">
  <h3>Rabadon's Deathcap</h3>
  <p>+120 Ability Power</p>
  <p>3600 gold</p>
  <p>Magical Opus: Increases Ability Power by 40%.</p>
</div>
<div class="item-container">
  <h3>Plated Steelcaps</h3>
  <p>+25 Armor</p>
  <p>1100 gold</p>
</div>
</body></html>"#;

pub const AHRI_PAGE: &str = r#"<html><head><title>Ahri - Wild Rift Build, Runes</title></head>
<body><article>
  <p>Ahri is a mobile mage for mid lane. Tier: S Win Rate: 52.3%</p>
  <p>Electrocute with Cheap Shot and Sudden Impact, then Font of Life.</p>
  <p>Start Doran's Ring, rush Luden's Echo then Rabadon's Deathcap. Boots: Ionian Boots of Lucidity.</p>
  <p>Spells: Flash and Ignite.</p>
</article></body></html>"#;

/// Garen with one build per lane; the jungle build names an item the items page lacks.
pub const GAREN_LANES_PAGE: &str = r#"<html><head><title>Garen - Wild Rift Build, Runes</title></head>
<body><article>
  <p>Garen is a durable fighter for baron lane.</p>
  <div class="build"><h2>Baron Lane Build</h2>
    <h4>Core Items</h4><ul><li>Rabadon's Deathcap</li></ul>
    <h4>Boots</h4><img alt="Plated Steelcaps">
  </div>
  <div class="build"><h2>Jungle Build</h2>
    <h4>Core Items</h4><img alt="Jungle Only Blade">
  </div>
</article></body></html>"#;

pub const GAREN_PAGE: &str = r#"<html><head><title>Garen - Wild Rift Build, Runes</title></head>
<body><article>
  <p>Garen is a durable fighter for baron lane. Tier: A</p>
  <p>Start Doran's Blade then Trinity Force. Boots: Plated Steelcaps.</p>
  <p>Spells: Flash and Ignite.</p>
</article></body></html>"#;

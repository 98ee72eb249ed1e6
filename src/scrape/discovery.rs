// src/scrape/discovery.rs
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::consts::{DISCOVERY_PATHS, VALIDATE_SAMPLE};
use crate::config::options::NetOptions;
use crate::core::net::{pause, Fetch};
use crate::core::sanitize::url_slug;
use crate::error::Result;
use crate::specs::discovery::{champion_links, mapping_from_urls};
use crate::store;

/// Outcome of checking discovered URLs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
    /// True when the sample passed and the rest were taken on trust.
    pub assumed_rest: bool,
}

/// Finds champion page URLs: index crawl, site search, then ID probing.
pub struct UrlMapper<'a, F: Fetch> {
    fetch: &'a F,
    net: NetOptions,
    catalog: &'a Catalog,
}

impl<'a, F: Fetch> UrlMapper<'a, F> {
    pub fn new(fetch: &'a F, net: NetOptions) -> Self {
        Self { fetch, net, catalog: Catalog::get() }
    }

    pub fn with_catalog(mut self, catalog: &'a Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Crawl the index pages for champion links. Pages that fail are skipped.
    pub fn discover(&self) -> Vec<String> {
        logf!("Discovering champion URLs from {}", self.net.base_url);
        let mut urls = BTreeSet::new();
        for path in DISCOVERY_PATHS {
            let url = self.net.url(path);
            logd!("checking {url}");
            match self.fetch.get(&url) {
                Ok(html) => {
                    urls.extend(champion_links(&html, &self.net.base_url).into_iter().map(|l| l.url));
                }
                Err(e) => logw!("error checking {url}: {e}"),
            }
            pause(self.net.pause_ms);
        }
        logf!("Discovered {} champion URLs", urls.len());
        urls.into_iter().collect()
    }

    /// HEAD the URL and expect 200.
    pub fn validate(&self, url: &str) -> bool {
        self.fetch.exists(url)
    }

    /// Check a sample of `urls`. If most of the sample is live the rest are
    /// assumed live too, otherwise every URL is checked.
    pub fn validate_all(&self, urls: &[String], sample: usize) -> Validation {
        let sample = sample.min(urls.len());
        let mut out = Validation::default();
        for url in &urls[..sample] {
            if self.validate(url) { out.valid.push(url.clone()) } else { out.invalid.push(url.clone()) }
        }
        if out.valid.len() > out.invalid.len() {
            out.assumed_rest = true;
            out.valid.extend_from_slice(&urls[sample..]);
        } else {
            logw!("sample validation failed, checking all URLs");
            for url in &urls[sample..] {
                if self.validate(url) { out.valid.push(url.clone()) } else { out.invalid.push(url.clone()) }
            }
        }
        out
    }

    pub fn validate_default(&self, urls: &[String]) -> Validation {
        self.validate_all(urls, VALIDATE_SAMPLE)
    }

    /// Manual correction first, then the site's search results.
    pub fn search(&self, name: &str) -> Option<String> {
        let slug = url_slug(name);

        if let Some(fixed) = self.catalog.correction(&slug) {
            let url = self.net.url(&format!("/{fixed}.html"));
            if self.validate(&url) {
                return Some(url);
            }
        }

        let search_url = self.net.url(&format!("/?s={name}"));
        match self.fetch.get(&search_url) {
            Ok(html) => champion_links(&html, &self.net.base_url)
                .into_iter()
                .filter(|l| l.slug.contains(&slug) || slug.contains(&l.slug))
                .map(|l| l.url)
                .find(|u| self.validate(u)),
            Err(e) => {
                logw!("search failed for {name}: {e}");
                None
            }
        }
    }

    /// Try `/{id}-{slug}.html` over the priority ID ranges. Compound names
    /// are also tried without hyphens. `None` once every range is exhausted.
    pub fn brute_force(&self, name: &str, max_id: u32) -> Option<String> {
        let slug = url_slug(name);
        let alt = slug.contains('-').then(|| slug.replace('-', ""));
        logf!("Brute force searching for {name}");

        let ranges = [1..100, 300..410, 50..200, 200..300, 410..max_id];
        for id in ranges.into_iter().flatten() {
            for s in std::iter::once(&slug).chain(alt.as_ref()) {
                let url = self.net.url(&format!("/{id}-{s}.html"));
                if self.validate(&url) {
                    logf!("Found: {url}");
                    return Some(url);
                }
            }
        }
        None
    }

    /// `{lowercased name: url}` for the given URLs.
    pub fn mapping(&self, urls: &[String]) -> BTreeMap<String, String> {
        mapping_from_urls(urls.iter().map(String::as_str))
    }

    pub fn save_mapping(&self, mapping: &BTreeMap<String, String>, path: &Path) -> Result<()> {
        store::write_json(path, mapping)?;
        logf!("Champion URL mapping saved to {}", path.display());
        Ok(())
    }
}

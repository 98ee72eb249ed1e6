// src/scrape/champions.rs
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    mpsc, Arc, Mutex, PoisonError,
};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::config::consts::{BRUTE_FORCE_MAX_ID, CHAMPION_LIST_FILE, DISCOVERED_URLS_FILE, MASTER_FILE};
use crate::config::options::{BatchOptions, DataDirs, NetOptions};
use crate::core::net::{pause, Fetch};
use crate::core::sanitize::{champion_file_stem, file_slug};
use crate::error::{Error, Result};
use crate::model::{BuildCategory, Champion};
use crate::progress::Progress;
use crate::specs::champion::{names_match, parse_champion};
use crate::specs::discovery::split_champion_url;
use crate::store;

use super::discovery::UrlMapper;
use super::enhance::Enhancer;

/// One row of `champion_list.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChampionListEntry {
    pub id: String,
    pub name: String,
    pub title: String,
    pub role: String,
    pub tier: String,
    pub image: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Lowercased champion name → record.
    pub champions: BTreeMap<String, Champion>,
    pub failed_urls: Vec<String>,
    pub corrected_urls: BTreeMap<String, String>,
    pub interrupted: bool,
}

pub struct BatchScraper<'a, F: Fetch> {
    fetch: &'a F,
    opts: BatchOptions,
    dirs: DataDirs,
    mapper: UrlMapper<'a, F>,
    enhancer: Enhancer<'a, F>,
    interrupted: Arc<AtomicBool>,
    corrected: Mutex<BTreeMap<String, String>>,
}

impl<'a, F: Fetch> BatchScraper<'a, F> {
    pub fn new(fetch: &'a F, net: NetOptions, opts: BatchOptions, dirs: DataDirs) -> Self {
        Self {
            fetch,
            mapper: UrlMapper::new(fetch, net.clone()),
            enhancer: Enhancer::new(fetch, net, opts.clone(), dirs.clone()),
            opts,
            dirs,
            interrupted: Arc::new(AtomicBool::new(false)),
            corrected: Mutex::new(BTreeMap::new()),
        }
    }

    /// Set this flag (e.g. from a Ctrl-C handler) to stop picking up new champions.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn enhancer(&self) -> &Enhancer<'a, F> {
        &self.enhancer
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Relaxed)
    }

    /// URLs from `discovered_champion_urls.json` if present, else a live crawl.
    pub fn discover_all(&self) -> Result<Vec<String>> {
        let saved = self.dirs.file(DISCOVERED_URLS_FILE);
        if saved.exists() {
            let urls: Vec<String> = store::read_json(&saved)?;
            logf!("Loaded {} URLs from {}", urls.len(), saved.display());
            return Ok(urls);
        }
        let urls = self.mapper.discover();
        if urls.is_empty() {
            return Err(Error::NotFound(s!("no champion URLs discovered; site layout may have changed")));
        }
        Ok(urls)
    }

    fn fetch_champion(&self, url: &str) -> Result<Champion> {
        parse_champion(&self.fetch.get(url)?, url)
    }

    fn note_correction(&self, from: &str, to: &str) {
        self.corrected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(s!(from), s!(to));
    }

    /// Up to `max_retries` attempts with a pause between them. A 404 first
    /// tries the corrected URL, and on the last attempt a brute-force ID search.
    pub fn scrape_with_retry(&self, url: &str) -> Result<Champion> {
        let attempts = self.opts.max_retries.max(1);
        let name = split_champion_url(url)
            .map(|(_, slug)| slug.replace('-', " "))
            .unwrap_or_else(|| s!(url.rsplit('/').next().unwrap_or(url)));
        let mut last: Option<Error> = None;

        for attempt in 0..attempts {
            if self.is_interrupted() {
                return Err(Error::Interrupted);
            }
            match self.fetch_champion(url) {
                Ok(c) => return Ok(c),
                Err(e) if e.is_not_found() => {
                    logw!("{url}: got 404, looking for the correct URL");
                    if let Some(fixed) = self.mapper.search(&name).filter(|u| u != url) {
                        logf!("retrying with corrected URL {fixed}");
                        self.note_correction(url, &fixed);
                        match self.fetch_champion(&fixed) {
                            Ok(c) => return Ok(c),
                            Err(e2) => logw!("corrected URL also failed: {e2}"),
                        }
                    }
                    if attempt + 1 == attempts {
                        if let Some(found) = self.mapper.brute_force(&name, BRUTE_FORCE_MAX_ID) {
                            self.note_correction(url, &found);
                            match self.fetch_champion(&found) {
                                Ok(c) => return Ok(c),
                                Err(e2) => logw!("brute force URL also failed: {e2}"),
                            }
                        }
                    }
                    last = Some(e);
                }
                Err(e) => {
                    logd!("attempt {} for {url} failed: {e}", attempt + 1);
                    last = Some(e);
                }
            }
            if attempt + 1 < attempts {
                logw!("attempt {} failed, retrying in {} ms", attempt + 1, self.opts.retry_pause_ms);
                pause(self.opts.retry_pause_ms);
            }
        }
        Err(last.unwrap_or_else(|| Error::NotFound(s!(url))))
    }

    /// Scrape, then enrich when enabled.
    pub fn scrape_one(&self, url: &str) -> Result<Champion> {
        let mut champ = self.scrape_with_retry(url)?;
        if self.opts.enhance {
            self.enhancer.enhance(&mut champ);
        }
        if let Some((_, slug)) = split_champion_url(url) {
            if !names_match(&champ.champion.name, &slug) {
                logw!("champion name mismatch: got '{}' from URL with slug '{slug}'", champ.champion.name);
            }
        }
        Ok(champ)
    }

    /// One champion, saved as `<slug>_enhanced.json` (or `<slug>_data.json`
    /// without enhancement) for the organizer to pick up.
    pub fn scrape_single(&self, url: &str) -> Result<(Champion, PathBuf)> {
        let champ = self.scrape_one(url)?;
        let suffix = if self.opts.enhance { "_enhanced" } else { "_data" };
        let path = self
            .dirs
            .champions()
            .join(format!("{}{suffix}.json", file_slug(&champ.champion.name)));
        store::write_json(&path, &champ)?;
        Ok((champ, path))
    }

    fn save(&self, champ: &Champion) -> Result<PathBuf> {
        let path = self
            .dirs
            .champions()
            .join(format!("{}.json", champion_file_stem(&champ.champion.name)));
        store::write_json(&path, champ)?;
        Ok(path)
    }

    /// Scrape `urls` (capped by `max_champions`) on the configured worker count.
    /// One champion failing never stops the run.
    pub fn scrape_all(&self, urls: &[String], progress: &mut dyn Progress) -> Result<BatchOutcome> {
        let urls: Vec<String> = match self.opts.max_champions {
            Some(max) => urls.iter().take(max).cloned().collect(),
            None => urls.to_vec(),
        };
        store::ensure_directory(&self.dirs.champions())?;
        progress.begin(urls.len());
        logf!("Starting batch scraping of {} champions", urls.len());

        let mut out = BatchOutcome::default();
        let cursor = AtomicUsize::new(0);
        let workers = self.opts.workers.min(urls.len()).max(1);

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel::<(String, Result<Champion>)>();
            for _ in 0..workers {
                let tx = tx.clone();
                let (urls, cursor) = (&urls, &cursor);
                scope.spawn(move || loop {
                    if self.is_interrupted() {
                        break;
                    }
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(url) = urls.get(i) else { break };
                    let result = self.scrape_one(url);
                    if tx.send((url.clone(), result)).is_err() {
                        break;
                    }
                    pause(self.opts.champion_pause_ms);
                });
            }
            drop(tx);

            for (url, result) in rx {
                match result.and_then(|c| self.save(&c).map(|p| (c, p))) {
                    Ok((champ, path)) => {
                        let b = &champ.builds;
                        let count = |cat| b.list(cat).map_or(0, Vec::len);
                        logf!(
                            "{}: {} stats, items start {} core {} boots {} situational {}, saved to {}",
                            champ.champion.name,
                            champ.stats.len(),
                            count(BuildCategory::Starting),
                            count(BuildCategory::Core),
                            count(BuildCategory::Boots),
                            count(BuildCategory::Situational),
                            path.display(),
                        );
                        progress.item_done(&champ.champion.name, true);
                        out.champions.insert(champ.champion.name.to_lowercase(), champ);
                    }
                    Err(Error::Interrupted) => progress.item_done(&url, false),
                    Err(e) => {
                        loge!("failed to scrape {url}: {e}");
                        progress.item_done(&url, false);
                        out.failed_urls.push(url);
                    }
                }
            }
        });
        progress.finish();

        out.interrupted = self.is_interrupted();
        out.corrected_urls = self.corrected.lock().unwrap_or_else(PoisonError::into_inner).clone();
        out.failed_urls.sort();

        store::write_json(&self.dirs.champions().join(MASTER_FILE), &out.champions)?;
        store::write_json(&self.dirs.champions().join(CHAMPION_LIST_FILE), &champion_list(&out.champions))?;
        if self.opts.enhance {
            self.enhancer.report().write(&self.dirs.logs())?;
        }
        Ok(out)
    }
}

/// `champion_list.json` rows, sorted by name.
pub fn champion_list(champions: &BTreeMap<String, Champion>) -> Vec<ChampionListEntry> {
    let mut list: Vec<ChampionListEntry> = champions
        .values()
        .map(|c| ChampionListEntry {
            id: c.champion.id.clone(),
            name: c.champion.name.clone(),
            title: c.champion.title.clone(),
            role: c.champion.role.clone(),
            tier: c.meta.as_ref().map(|m| m.tier.clone()).unwrap_or_else(|| c.champion.tier.clone()),
            image: c.champion.image.clone(),
        })
        .collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

impl BatchOutcome {
    pub fn print_summary(&self, dirs: &DataDirs) {
        println!("\nScraping Summary:");
        println!("    Successful: {}", self.champions.len());
        println!("    Failed: {}", self.failed_urls.len());
        println!("    URL Corrections: {}", self.corrected_urls.len());
        println!("    Data saved to: {}", dirs.champions().display());
        if self.interrupted {
            println!("    Interrupted: partial results saved");
        }
        if !self.corrected_urls.is_empty() {
            println!("\nURL Corrections Made:");
            for (from, to) in &self.corrected_urls {
                println!("   {from} -> {to}");
            }
        }
        if !self.failed_urls.is_empty() {
            println!("\nFailed URLs:");
            for url in &self.failed_urls {
                println!("   {url}");
            }
        }
    }
}

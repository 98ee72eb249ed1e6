// src/specs/champion.rs
//! Extraction spec for a champion detail page (`/{id}-{slug}.html`).
//!
//! Produces a `Champion` with names only: build item names, rune names, spells.
//! Detailed item/rune records are attached later by `scrape::enhance`.
//!
//! Keyword checks run over the article body when one exists, because the site
//! chrome mentions every role and lane on every page.
//!
//! Pages that split builds by lane get `builds.lane_specific` as well: one
//! [`LaneBuild`] per lane heading (`Mid Lane Build`, `Jungle Build`, ...). The
//! lane section is the heading's own `div`/`section` wrapper when it holds no
//! other lane heading, else the siblings up to the next lane heading. Inside a
//! section, category sub-headings switch which list `img[alt]` and `li` item
//! mentions go to. Boots entries naming an enchant move to `enchants`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde_json::{json, Map, Value};

use crate::catalog::{Catalog, Slot};
use crate::config::consts::{MAX_LANE_CATEGORY_ITEMS, MAX_TIPS};
use crate::core::html::{block_text, inline_text, sel, title};
use crate::core::sanitize::{clean_item_name, title_case};
use crate::error::Result;
use crate::model::{compare_lane_builds, Champion, ChampionInfo, LaneBuild, champion::Meta};

/// Items worth spotting even when the catalog has no record for them.
const COMMON_ITEMS: &[&str] = &[
    "Plated Steelcaps", "Mercury's Treads", "Ionian Boots of Lucidity", "Infinity Edge",
    "Rabadon's Deathcap", "Blade of the Ruined King", "Guardian Angel", "Thornmail",
    "Frozen Heart", "Luden's Echo", "Riftmaker", "Divine Sunderer", "Trinity Force",
    "Black Cleaver", "Doran's Blade", "Doran's Ring", "Doran's Shield",
];

const SUMMONER_SPELLS: &[&str] = &[
    "Flash", "Ignite", "Exhaust", "Heal", "Barrier", "Ghost", "Smite", "Teleport", "Cleanse",
];

fn re(p: &str) -> Regex {
    Regex::new(p).expect("static regex")
}

static TITLE_NAME: LazyLock<Regex> = LazyLock::new(|| re(r"([A-Za-z'\s]+?)\s*-\s*Wild Rift"));
static TIER: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\btier\s*:?\s*([SABCD]\+?)(?:\s|$)"));
static WIN_RATE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)win\s*rate\s*:?\s*(\d+(?:\.\d+)?%)"));
static PICK_RATE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)pick\s*rate\s*:?\s*(\d+(?:\.\d+)?%)"));

static LANES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("Baron Lane", re(r"\b(?:baron|top)\b")),
        ("Mid Lane", re(r"\bmid\b")),
        ("Jungle", re(r"\bjungle\b")),
        ("Dragon Lane", re(r"\b(?:dragon|bot|adc)\b")),
        ("Support", re(r"\bsupport\b")),
    ]
});

/// Lane build headings, first match wins.
static LANE_HEADINGS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("Baron Lane", re(r"(?i)(?:solo baron|baron lane|top lane).*build")),
        ("Mid Lane", re(r"(?i)\b(?:mid|middle lane)\b.*build")),
        ("Jungle", re(r"(?i)\b(?:jungle|jg)\b.*build")),
        ("Dragon Lane", re(r"(?i)(?:dragon lane|bot lane|\badc\b).*build")),
        ("Support", re(r"(?i)\bsupp(?:ort)?\b.*build")),
    ]
});

/// Sub-heading keywords per lane build list, checked in this order.
const LANE_CATEGORIES: [(&str, &[&str]); 5] = [
    ("example_build", &["example", "full build", "complete"]),
    ("boots", &["boots", "footwear"]),
    ("starting_items", &["start", "early"]),
    ("core_items", &["core", "main", "essential"]),
    ("situational_items", &["situational", "optional", "counter"]),
];

/// `https://wr-meta.com/332-aatrox.html` → `332-aatrox`
pub fn page_id(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or(url);
    last.trim_end_matches(".html").to_string()
}

/// Champion name from `<title>`, else from the URL slug.
pub fn champion_name(doc: &Html, url: &str) -> String {
    if let Some(t) = title(doc) {
        if let Some(c) = TITLE_NAME.captures(&t) {
            let name = c[1].trim();
            if !name.is_empty() {
                return title_case_name(name);
            }
        }
    }
    let id = page_id(url);
    let slug = id.split_once('-').map(|(_, s)| s).unwrap_or(&id);
    title_case(slug)
}

/// Title-case that keeps apostrophes attached: `kai'sa` → `Kai'sa`.
fn title_case_name(name: &str) -> String {
    name.split_whitespace()
        .map(|w| {
            let mut cs = w.chars();
            match cs.next() {
                Some(f) => f.to_uppercase().chain(cs.flat_map(char::to_lowercase)).collect(),
                None => s!(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn role_for(content_lower: &str) -> &'static str {
    for (kw, role) in [
        ("support", "Support"),
        ("marksman", "Marksman"),
        ("mage", "Mage"),
        ("assassin", "Assassin"),
        ("tank", "Tank"),
    ] {
        if content_lower.contains(kw) {
            return role;
        }
    }
    "Fighter"
}

pub fn lanes_for(content_lower: &str) -> Vec<String> {
    let lanes: Vec<String> = LANES
        .iter()
        .filter(|(_, r)| r.is_match(content_lower))
        .map(|(l, _)| s!(*l))
        .collect();
    if lanes.is_empty() { vec![s!("Baron Lane")] } else { lanes }
}

/// Names from `candidates` that occur as whole words in `content_lower`,
/// ordered by first occurrence.
pub fn mentioned<'a>(content_lower: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut hits: Vec<(usize, String)> = Vec::new();
    for name in candidates {
        if hits.iter().any(|(_, n)| n == name) {
            continue;
        }
        if let Some(pos) = find_word(content_lower, &name.to_lowercase()) {
            hits.push((pos, s!(name)));
        }
    }
    hits.sort_by_key(|(p, _)| *p);
    hits.into_iter().map(|(_, n)| n).collect()
}

fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric());
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !is_word(before) && !is_word(after)
    })
}

fn content_root(doc: &Html) -> Result<ElementRef<'_>> {
    let preferred = sel("article, .entry-content, .full-story, main")?;
    if let Some(el) = doc.select(&preferred).next() {
        return Ok(el);
    }
    Ok(doc.root_element())
}

/// Tips: list items under the first heading that mentions tips.
fn tips(doc: &Html) -> Result<Vec<String>> {
    let headings = sel("h2, h3, h4")?;
    let li = sel("li")?;
    for h in doc.select(&headings) {
        if !inline_text(h).to_lowercase().contains("tips") {
            continue;
        }
        for sib in h.next_siblings().filter_map(ElementRef::wrap) {
            let tag = sib.value().name();
            if matches!(tag, "h2" | "h3" | "h4") {
                break;
            }
            let items: Vec<String> = sib.select(&li).map(inline_text).filter(|t| !t.is_empty()).collect();
            if !items.is_empty() {
                return Ok(items.into_iter().take(MAX_TIPS).collect());
            }
        }
    }
    Ok(Vec::new())
}

pub fn lane_of_heading(text: &str) -> Option<&'static str> {
    LANE_HEADINGS.iter().find(|(_, r)| r.is_match(text)).map(|(l, _)| *l)
}

fn lane_category(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    LANE_CATEGORIES
        .iter()
        .find(|(_, kws)| kws.iter().any(|k| lower.contains(k)))
        .map(|(key, _)| *key)
}

fn is_lane_heading(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h1" | "h2" | "h3") && lane_of_heading(&inline_text(el)).is_some()
}

/// Elements making up the build section under one lane heading.
fn lane_section(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let wrapper = heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|p| matches!(p.value().name(), "div" | "section"))
        .filter(|p| p.descendants().filter_map(ElementRef::wrap).filter(|e| is_lane_heading(*e)).count() == 1);
    if let Some(w) = wrapper {
        return vec![w];
    }
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|e| !is_lane_heading(*e))
        .collect()
}

fn lane_build(section: &[ElementRef<'_>], candidates: &[&str]) -> LaneBuild {
    let mut lists: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    let mut current: Option<&str> = None;
    for el in section.iter().flat_map(|s| s.descendants().filter_map(ElementRef::wrap)) {
        let tag = el.value().name();
        let found: Vec<String> = match tag {
            "h3" | "h4" | "h5" | "h6" | "strong" | "b" => {
                if let Some(cat) = lane_category(&inline_text(el)) {
                    current = Some(cat);
                }
                continue;
            }
            "img" => el.value().attr("alt").map(clean_item_name).into_iter().collect(),
            "li" => mentioned(&inline_text(el).to_lowercase(), candidates.iter().copied()),
            _ => continue,
        };
        let Some(cat) = current else { continue };
        let list = lists.entry(cat).or_default();
        for name in found {
            if !name.is_empty() && !list.contains(&name) && list.len() < MAX_LANE_CATEGORY_ITEMS {
                list.push(name);
            }
        }
    }

    let mut take = |key: &str| lists.remove(key).unwrap_or_default();
    let (enchants, boots): (Vec<String>, Vec<String>) =
        take("boots").into_iter().partition(|n| n.to_lowercase().contains("enchant"));
    LaneBuild {
        starting_items: take("starting_items"),
        core_items: take("core_items"),
        boots,
        situational_items: take("situational_items"),
        example_build: take("example_build"),
        enchants,
        ..Default::default()
    }
}

/// Per-lane builds keyed by lane name. Lanes whose section lists nothing are
/// left out, as is a second heading for a lane already seen.
pub fn lane_builds(doc: &Html, candidates: &[&str]) -> Result<BTreeMap<String, LaneBuild>> {
    let headings = sel("h1, h2, h3")?;
    let mut out = BTreeMap::new();
    for h in doc.select(&headings) {
        let Some(lane) = lane_of_heading(&inline_text(h)) else { continue };
        if out.contains_key(lane) {
            continue;
        }
        let build = lane_build(&lane_section(h), candidates);
        if !build.is_empty() {
            out.insert(s!(lane), build);
        }
    }
    Ok(out)
}

/// Parse a champion page. Build lists hold item names sorted into
/// starting/core/boots by the catalog keyword lists.
pub fn parse_champion(html: &str, url: &str) -> Result<Champion> {
    let doc = Html::parse_document(html);
    let catalog = Catalog::get();
    let root = content_root(&doc)?;
    let content = block_text(root);
    let lower = content.to_lowercase();

    let name = champion_name(&doc, url);
    let lanes = lanes_for(&lower);
    let tier = TIER.captures(&content).map(|c| s!(&c[1])).unwrap_or_default();

    let mut champ = Champion {
        champion: ChampionInfo {
            id: page_id(url),
            name,
            role: s!(role_for(&lower)),
            lanes: lanes.clone(),
            tier: tier.clone(),
            ..Default::default()
        },
        abilities: Value::Object(Map::new()),
        summoner_spells: mentioned(&lower, SUMMONER_SPELLS.iter().copied()),
        tips: tips(&doc)?,
        ..Default::default()
    };

    // Builds
    let candidates: Vec<&str> = catalog.items.keys().map(String::as_str).chain(COMMON_ITEMS.iter().copied()).collect();
    let item_names = mentioned(&lower, candidates.iter().copied());
    let (mut starting, mut core, mut boots) = (Vec::new(), Vec::new(), Vec::new());
    for item in item_names {
        match catalog.keyword_slot(&item) {
            Some(Slot::Boots) => boots.push(item),
            Some(Slot::Starting) => starting.push(item),
            _ => core.push(item),
        }
    }
    let b = &mut champ.builds;
    b.lanes = lanes;
    b.starting_items = Some(starting);
    b.core_items = Some(core);
    b.boots = Some(boots);
    b.situational_items = Some(Vec::new());
    b.example_build = Some(Vec::new());
    b.enchants = Some(Vec::new());
    let per_lane = lane_builds(&doc, &candidates)?;
    if per_lane.len() > 1 {
        let differences: Vec<Value> = compare_lane_builds(&per_lane)
            .into_iter()
            .map(|d| json!({ "category": d.category, "lane_differences": d.lanes }))
            .collect();
        b.extra.insert(s!("lane_comparison"), json!({
            "identical": differences.is_empty(),
            "differences": differences,
        }));
    }
    b.lane_specific = (!per_lane.is_empty()).then_some(per_lane);

    // Runes: keystone first, its tree's runes next, then one secondary tree.
    let runes = mentioned(&lower, catalog.rune_names());
    let facts = |n: &str| catalog.rune(n);
    let keystone = runes
        .iter()
        .find(|r| facts(r).and_then(|f| f.kind.as_deref()) == Some("Keystone"));
    if let Some(ks) = keystone {
        let tree = facts(ks).and_then(|f| f.tree.clone()).unwrap_or_default();
        let page = &mut champ.runes;
        page.primary.tree = tree.clone();
        page.primary.keystone = ks.clone();
        page.primary.runes = runes
            .iter()
            .filter(|r| *r != ks)
            .filter(|r| facts(r).and_then(|f| f.kind.as_deref()) != Some("Keystone"))
            .filter(|r| facts(r).and_then(|f| f.tree.as_deref()) == Some(tree.as_str()))
            .take(3)
            .cloned()
            .collect();
        let second_tree = runes
            .iter()
            .filter_map(|r| facts(r).and_then(|f| f.tree.clone()))
            .find(|t| *t != tree);
        if let Some(st) = second_tree {
            page.secondary.runes = runes
                .iter()
                .filter(|r| facts(r).and_then(|f| f.kind.as_deref()) != Some("Keystone"))
                .filter(|r| facts(r).and_then(|f| f.tree.as_deref()) == Some(st.as_str()))
                .take(2)
                .cloned()
                .collect();
            page.secondary.tree = st;
        }
    }

    let win_rate = WIN_RATE.captures(&content).map(|c| s!(&c[1])).unwrap_or_default();
    let pick_rate = PICK_RATE.captures(&content).map(|c| s!(&c[1])).unwrap_or_default();
    if !tier.is_empty() || !win_rate.is_empty() || !pick_rate.is_empty() {
        champ.meta = Some(Meta { tier, win_rate, pick_rate, ..Default::default() });
    }

    Ok(champ)
}

/// Loose check that a scraped page is about the champion we asked for:
/// equal names, one containing the other, or more than 60% shared letters.
pub fn names_match(scraped: &str, expected: &str) -> bool {
    let norm = |s: &str| -> String {
        s.to_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect()
    };
    let (a, b) = (norm(scraped), norm(expected));
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b || a.contains(&b) || b.contains(&a) {
        return true;
    }
    let shared = a.chars().filter(|c| b.contains(*c)).count();
    shared as f64 / a.len().max(b.len()) as f64 > 0.6
}

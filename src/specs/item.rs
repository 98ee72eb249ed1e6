// src/specs/item.rs
//! Extraction spec for item blocks on the items page (and single item pages).
//!
//! Purpose:
//! - Find the blocks that describe one item each.
//! - Turn a block's text into an `Item`: stats, cost, passive/active, description, tips,
//!   plus a derived category and tier.
//!
//! Selector precedence for containers:
//! 1. `.item-container, .item-box, .item-card, .item`
//! 2. any `div/section/article` whose class mentions `item`, `card` or `box`
//! 3. the nearest block ancestor of any text that looks like a gold cost
//!
//! Stat patterns run in a fixed order and each stat takes its first match only.
//! Nothing here touches the network or the disk.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};

use crate::config::consts::MAX_TIPS;
use crate::core::html::{block_text, find_ancestor, first_text, has_class_containing, inline_text, sel};
use crate::core::sanitize::normalize_ws;
use crate::error::Result;
use crate::model::{Item, Stat};

const BLOCK_TAGS: &[&str] = &["div", "section", "article", "tr", "td"];
const NAME_TAGS: &str = "h2, h3, h4, strong, b";
const LOCATE_TAGS: &str = "h2, h3, h4, strong, b, span";

/// Labels that look like `Name: effect` but are not named passives.
const NOT_PASSIVE_LABELS: &[&str] = &[
    "Passive", "Active", "Cost", "Gold", "Price", "Description", "Details", "Tips", "Tip",
    "Stats", "Build", "Builds Into", "Recipe", "Category", "Tier",
];

fn re(p: &str) -> Regex {
    Regex::new(p).expect("static regex")
}

/// `(stat key, pattern)` in priority order. Group 1 is the number, `%` included when present.
static STAT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("ability_power", re(r"(?i)(\+?\d+)\s*(?:Ability Power|\bAP\b)")),
        ("attack_damage", re(r"(?i)(\+?\d+)\s*(?:Attack Damage|\bAD\b)")),
        ("health", re(r"(?i)(\+?\d+)\s*Health\b")),
        ("mana", re(r"(?i)(\+?\d+)\s*Mana\b")),
        ("armor", re(r"(?i)(\+?\d+)\s*Armor\b")),
        ("magic_resistance", re(r"(?i)(\+?\d+)\s*(?:Magic Resist(?:ance)?|\bMR\b)")),
        ("attack_speed", re(r"(?i)(\+?\d+%?)\s*Attack Speed")),
        ("critical_strike", re(r"(?i)(\+?\d+%?)\s*(?:Critical Strike|\bCrit\b)")),
        ("magic_penetration", re(r"(?i)(\+?\d+%?)\s*(?:Magic Penetration|Magic Pen\b)")),
        ("movement_speed", re(r"(?i)(\+?\d+%?)\s*Move(?:ment)? Speed")),
        ("life_steal", re(r"(?i)(\+?\d+%?)\s*Life ?Steal")),
        ("ability_haste", re(r"(?i)(\+?\d+)\s*(?:Ability Haste|\bAH\b)")),
    ]
});

pub static COST: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(\d{3,4})\s*(?:gold|cost)"));
static PASSIVE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bpassive\b\s*[:\-]?\s*([^\n]+)"));
static NAMED_PASSIVE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?m)^([A-Z][a-z]+(?: [A-Z][a-z]+)?):\s*([^\n]+)"));
static ACTIVE: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bactive\b\s*[:\-]?\s*([^\n]+)"));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(?:description|details)\b\s*:?\s*([^\n]+)"));
static NAME_GUESS: LazyLock<Regex> =
    LazyLock::new(|| re(r"([A-Z][a-z]+(?:\s+[A-Z][a-z']+){1,4})"));
static NAME_PREFIX: LazyLock<Regex> = LazyLock::new(|| re(r"^[:\s]*(?:\w+:\s*)?"));
static TIPS_LABEL: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\btips?\b\s*:?\s*"));

/// Stat map from free text, patterns in priority order, first hit per stat.
pub fn extract_stats(text: &str) -> Vec<(&'static str, Stat)> {
    let mut out = Vec::new();
    for (key, pattern) in STAT_PATTERNS.iter() {
        let Some(cap) = pattern.captures(text) else { continue };
        let raw = cap[1].trim_start_matches('+');
        let pct = raw.ends_with('%');
        let Ok(n) = raw.trim_end_matches('%').parse::<u64>() else { continue };
        out.push((*key, if pct { Stat::percentage(n) } else { Stat::flat(n) }));
    }
    out
}

pub fn extract_cost(text: &str) -> Option<u64> {
    COST.captures(text).and_then(|c| c[1].parse().ok())
}

/// Explicit `Passive:` line first, then a named effect such as `Overkill: ...`.
pub fn extract_passive(text: &str) -> Option<String> {
    if let Some(c) = PASSIVE.captures(text) {
        return Some(normalize_ws(&c[1]));
    }
    NAMED_PASSIVE
        .captures_iter(text)
        .find(|c| !NOT_PASSIVE_LABELS.contains(&&c[1]))
        .map(|c| format!("{}: {}", &c[1], normalize_ws(&c[2])))
}

pub fn extract_active(text: &str) -> Option<String> {
    ACTIVE.captures(text).map(|c| normalize_ws(&c[1]))
}

pub fn extract_description(text: &str, name: &str) -> Option<String> {
    let named = Regex::new(&format!(r"(?i){}\s*(?:tips?|description)\s*:?\s*([^\n]+)", regex::escape(name))).ok();
    named
        .and_then(|r| r.captures(text).map(|c| normalize_ws(&c[1])))
        .or_else(|| DESCRIPTION.captures(text).map(|c| normalize_ws(&c[1])))
}

pub fn category_for(name: &str, cost: u64) -> &'static str {
    let lower = name.to_lowercase();
    if ["boots", "treads", "greaves"].iter().any(|w| lower.contains(w)) {
        "boots"
    } else if cost < 1000 {
        "basic"
    } else if lower.contains("enchant") {
        "enchant"
    } else {
        "legendary"
    }
}

pub fn tier_for(cost: u64) -> &'static str {
    if cost > 3000 { "S" } else if cost < 1000 { "B" } else { "A" }
}

/// Strip leading colons and a one-word `Prefix:` from a heading.
pub fn clean_name(raw: &str) -> String {
    let s = normalize_ws(raw);
    NAME_PREFIX.replace(&s, "").trim().to_string()
}

/// Build an item from block text. `None` when no name can be found.
pub fn extract_item(text: &str, heading: Option<&str>, tips: Vec<String>) -> Option<Item> {
    let raw_name = match heading {
        Some(h) if !h.trim().is_empty() => s!(h),
        _ => NAME_GUESS.captures(text).map(|c| s!(&c[1]))?,
    };
    let name = clean_name(&raw_name);
    if name.is_empty() {
        return None;
    }

    let mut item = Item::named(name.clone());
    for (key, stat) in extract_stats(text) {
        item.set_stat(key, stat);
    }
    if item.stats.is_none() {
        item.stats = Some(Default::default());
    }
    let cost = extract_cost(text).unwrap_or(0);
    item.set_cost(cost);
    item.passive = Some(extract_passive(text).unwrap_or_default());
    item.active = Some(extract_active(text).unwrap_or_default());
    item.description = Some(extract_description(text, &name).unwrap_or_default());
    item.category = Some(s!(category_for(&name, cost)));
    item.tier = Some(s!(tier_for(cost)));
    item.tips = Some(tips.into_iter().take(MAX_TIPS).collect());
    Some(item)
}

/// Item from one container element: heading, block text and tips list.
pub fn extract_from_container(el: ElementRef<'_>) -> Result<Option<Item>> {
    let heading = first_text(el, &sel(NAME_TAGS)?);
    let text = block_text(el);
    let tips = extract_tips(el)?;
    Ok(extract_item(&text, heading.as_deref(), tips))
}

/// Tips live under whatever element carries the word "tips": its `li`s,
/// or failing that its text split into sentences.
pub fn extract_tips(el: ElementRef<'_>) -> Result<Vec<String>> {
    let li = sel("li")?;
    let holder = el.descendants().find_map(|n| match n.value() {
        Node::Text(t) if t.to_lowercase().contains("tips") => n.parent().and_then(ElementRef::wrap),
        _ => None,
    });
    let Some(holder) = holder else { return Ok(Vec::new()) };

    for scope in std::iter::once(holder).chain(holder.parent().and_then(ElementRef::wrap)) {
        let items: Vec<String> = scope.select(&li).map(inline_text).filter(|t| !t.is_empty()).collect();
        if !items.is_empty() {
            return Ok(items);
        }
    }

    let text = TIPS_LABEL.replace(&block_text(holder), "").to_string();
    Ok(text
        .split(|c| c == '\n')
        .flat_map(|line| line.split(". "))
        .map(|t| t.trim().trim_end_matches('.').to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Candidate item blocks, in document order, without duplicates.
pub fn find_item_containers(doc: &Html) -> Result<Vec<ElementRef<'_>>> {
    let primary: Vec<ElementRef> = doc.select(&sel(".item-container, .item-box, .item-card, .item")?).collect();
    if !primary.is_empty() {
        return Ok(primary);
    }

    let classed: Vec<ElementRef> = doc
        .select(&sel("div[class], section[class], article[class]")?)
        .filter(|e| has_class_containing(*e, &["item", "card", "box"]))
        .collect();
    if !classed.is_empty() {
        return Ok(classed);
    }

    logd!("no item containers by class, falling back to cost text");
    let mut out: Vec<ElementRef> = Vec::new();
    for node in doc.root_element().descendants() {
        let Node::Text(t) = node.value() else { continue };
        if !COST.is_match(t) {
            continue;
        }
        let container = node
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|p| find_ancestor(p, BLOCK_TAGS));
        if let Some(c) = container {
            if !out.iter().any(|o| o.id() == c.id()) {
                out.push(c);
            }
        }
    }
    Ok(out)
}

/// Every item on a page.
pub fn extract_all(doc: &Html) -> Result<Vec<Item>> {
    let mut out = Vec::new();
    for c in find_item_containers(doc)? {
        if let Some(item) = extract_from_container(c)? {
            out.push(item);
        }
    }
    Ok(out)
}

/// Find one named item on a page: exact heading, then substring, then
/// case-insensitive substring. Walks up from the heading to the first block
/// that yields an item.
pub fn locate_item(doc: &Html, name: &str) -> Result<Option<Item>> {
    let tags = sel(LOCATE_TAGS)?;
    let lower = name.to_lowercase();

    for pass in 0..3 {
        for heading in doc.select(&tags) {
            let text = inline_text(heading);
            let hit = match pass {
                0 => text == name,
                1 => text.contains(name),
                _ => text.to_lowercase().contains(&lower),
            };
            if !hit {
                continue;
            }
            for anc in heading.ancestors().filter_map(ElementRef::wrap) {
                let tag = anc.value().name();
                if tag == "body" || tag == "html" {
                    break;
                }
                if !BLOCK_TAGS.contains(&tag) {
                    continue;
                }
                if let Some(item) = extract_from_container(anc)? {
                    return Ok(Some(item));
                }
            }
        }
    }
    Ok(None)
}

/// Main block of a single-item page, or `<body>`.
pub fn extract_page_item(doc: &Html) -> Result<Option<Item>> {
    let main = doc
        .select(&sel("div[class], section[class], article[class]")?)
        .find(|e| has_class_containing(*e, &["item-details", "item-container", "main-content"]));
    let main = match main {
        Some(m) => m,
        None => match doc.select(&sel("body")?).next() {
            Some(b) => b,
            None => return Ok(None),
        },
    };
    extract_from_container(main)
}

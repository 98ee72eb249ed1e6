// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&rsquo;", "'")
        .replace('\u{2019}', "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Display name → file stem. Every reader and writer of `items/`, `runes/`
/// and champion files goes through this one transform.
///
/// `"Rabadon's Deathcap"` → `"rabadons_deathcap"`.
pub fn file_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        match ch {
            '\'' | '\u{2019}' | ':' | '(' | ')' => {}
            ' ' | '-' | '/' | '_' => {
                if !last_us { out.push('_'); last_us = true; }
            }
            c => { out.push(c); last_us = false; }
        }
    }
    out.trim_matches('_').to_string()
}

/// Display name → URL slug as used in `/{id}-{slug}.html`.
pub fn url_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['\'', '\u{2019}', '.'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Champion output file stem, `<slug>_data`.
pub fn champion_file_stem(name: &str) -> String {
    join!(&file_slug(name), "_data")
}

/// `"miss-fortune"` → `"Miss Fortune"`.
pub fn title_case(slug: &str) -> String {
    slug.split(['-', ' ', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut cs = w.chars();
            match cs.next() {
                Some(first) => first.to_uppercase().chain(cs.flat_map(char::to_lowercase)).collect(),
                None => s!(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

static LIST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("static regex"));
static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)$").expect("static regex"));
static FIRST_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

/// Strip list numbering and a trailing parenthetical from a build entry:
/// `"1. Infinity Edge (core)"` → `"Infinity Edge"`.
pub fn clean_item_name(raw: &str) -> String {
    let s = normalize_ws(raw);
    let s = LIST_NUMBER.replace(&s, "");
    let s = TRAILING_PAREN.replace(&s, "");
    s.trim().to_string()
}

/// First run of digits in a string, e.g. a cost written as `"3400 gold"`.
pub fn first_int(s: &str) -> Option<u64> {
    FIRST_INT.find(s).and_then(|m| m.as_str().parse().ok())
}

/// Cut at a sentence end when one exists within `max` chars, otherwise at `max` chars.
pub fn first_sentence(s: &str, max: usize) -> String {
    let s = normalize_ws(s);
    let cut: String = s.chars().take(max).collect();
    match cut.find(". ") {
        Some(i) => cut[..=i].to_string(),
        None if cut.len() < s.len() => cut.trim_end().to_string(),
        None => cut,
    }
}

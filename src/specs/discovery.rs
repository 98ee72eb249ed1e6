// src/specs/discovery.rs
//! Champion link discovery on index and search pages.
//!
//! Champion pages are `/{id}-{slug}.html`, linked absolutely or relatively.
//! Output URLs are lowercased, deduplicated and sorted so repeated crawls diff cleanly.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::sanitize::title_case;

static ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href="(https?://(?:www\.)?wr-meta\.com/(\d+)-([a-z0-9-]+)\.html)""#).expect("static regex")
});
static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href="(/(\d+)-([a-z0-9-]+)\.html)""#).expect("static regex")
});
static PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(\d+)-([a-z0-9-]+)\.html$").expect("static regex")
});

/// A champion page link: numeric id and slug.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChampionLink {
    pub id: u32,
    pub slug: String,
    pub url: String,
}

/// All champion links on a page, absolute and relative, resolved against `base`.
pub fn champion_links(html: &str, base: &str) -> Vec<ChampionLink> {
    let base = base.trim_end_matches('/');
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();

    let abs = ABSOLUTE.captures_iter(html).map(|c| (s!(&c[1]), s!(&c[2]), s!(&c[3])));
    let rel = RELATIVE.captures_iter(html).map(|c| (join!(base, &c[1]), s!(&c[2]), s!(&c[3])));
    for (url, id, slug) in abs.chain(rel) {
        let url = url.to_lowercase();
        let Ok(id) = id.parse::<u32>() else { continue };
        if seen.insert(url.clone()) {
            out.push(ChampionLink { id, slug: slug.to_lowercase(), url });
        }
    }
    out.sort_by(|a, b| a.url.cmp(&b.url));
    out
}

/// `(id, slug)` of a champion page URL.
pub fn split_champion_url(url: &str) -> Option<(u32, String)> {
    let c = PAGE.captures(url)?;
    Some((c[1].parse().ok()?, c[2].to_lowercase()))
}

/// `{lowercased display name: url}` for a list of champion URLs.
pub fn mapping_from_urls<'a>(urls: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, String> {
    urls.into_iter()
        .filter_map(|u| {
            let (_, slug) = split_champion_url(u)?;
            Some((title_case(&slug).to_lowercase(), s!(u)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
<a href="https://wr-meta.com/332-Aatrox.html">Aatrox</a>
<a href="/1-ahri.html">Ahri</a>
<a href="/1-ahri.html">Ahri again</a>
<a href="/tier-list/">Tier list</a>
<a href="https://wr-meta.com/378-miss-fortune.html">MF</a>"#;

    #[test]
    fn finds_absolute_and_relative_links() {
        let links = champion_links(INDEX, "https://wr-meta.com/");
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, [
            "https://wr-meta.com/1-ahri.html",
            "https://wr-meta.com/332-aatrox.html",
            "https://wr-meta.com/378-miss-fortune.html",
        ]);
        assert_eq!(links[2].id, 378);
        assert_eq!(links[2].slug, "miss-fortune");
    }

    #[test]
    fn mapping_keys_are_lowercased_names() {
        let m = mapping_from_urls(["https://wr-meta.com/378-miss-fortune.html"]);
        assert_eq!(m.get("miss fortune").map(String::as_str), Some("https://wr-meta.com/378-miss-fortune.html"));
    }
}

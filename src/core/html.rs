// src/core/html.rs

// DOM helpers over `scraper`. Extraction regexes run over the text these produce.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use super::sanitize::{normalize_entities, normalize_ws};

/// Parse a CSS selector, turning the borrowed parse error into ours.
pub fn sel(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| parse_err!("bad selector {css:?}: {e}"))
}

/// Text of an element, one trimmed text node per line.
/// Keeping line breaks stops a heading from running into the stat under it.
pub fn block_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(|t| normalize_ws(&normalize_entities(t)))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole-document text (same shape as `block_text`).
pub fn document_text(doc: &Html) -> String {
    block_text(doc.root_element())
}

/// Flattened single-line text of an element.
pub fn inline_text(el: ElementRef<'_>) -> String {
    normalize_ws(&normalize_entities(&el.text().collect::<Vec<_>>().join(" ")))
}

/// First match of `css` under `el`, as inline text.
pub fn first_text(el: ElementRef<'_>, css: &Selector) -> Option<String> {
    el.select(css).next().map(inline_text).filter(|t| !t.is_empty())
}

/// Nearest ancestor (self excluded) whose tag is one of `tags`.
pub fn find_ancestor<'a>(el: ElementRef<'a>, tags: &[&str]) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| tags.contains(&a.value().name()))
}

/// `<title>` text, if any.
pub fn title(doc: &Html) -> Option<String> {
    let t = sel("title").ok()?;
    doc.select(&t).next().map(inline_text).filter(|s| !s.is_empty())
}

pub fn has_class_containing(el: ElementRef<'_>, needles: &[&str]) -> bool {
    el.value().classes().any(|c| needles.iter().any(|n| c.contains(n)))
}

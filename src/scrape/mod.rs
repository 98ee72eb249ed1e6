// src/scrape/mod.rs
//! Fetch orchestration: which pages to hit, in what order, how often to retry
//! and where the results land. Parsing is delegated to `specs`.
pub mod champions;
pub mod discovery;
pub mod enhance;
pub mod items;
pub mod report;

pub use champions::{BatchOutcome, BatchScraper};
pub use discovery::UrlMapper;
pub use enhance::{EnhanceStats, Enhancer};
pub use items::ItemScraper;

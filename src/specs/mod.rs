// src/specs/mod.rs
//! # Page extraction “specs”
//!
//! Page-specific extraction for the site. Each spec knows *where the facts live in
//! the HTML* of one kind of page and *how to pull them out* without falling over
//! when the markup shifts.
//!
//! ## What lives here
//! - **Pure HTML/text parsing** of pages already fetched by someone else.
//! - **Selector precedence** (e.g. item classes first, then class-name guesses,
//!   then blocks around gold-cost text).
//! - **Ordered regex heuristics** over block text: first matching pattern wins.
//! - **Light shaping** into `model` records.
//!
//! ## What does **not** live here
//! - **Networking, retries and pacing** – `scrape::*` owns those.
//! - **Persistence** – `store` writes files.
//! - **Patching or validation** – `patch` and `validate` work on saved records.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::<kind> → Fetch::get(url) → specs::<page>::parse(html)
//!                                       ↘  model record
//!                      store::write_json (outside of specs)
//! ```
//!
//! ## Conventions
//! - Patterns are case-insensitive unless capitalisation is the signal
//!   (named passives like `Overkill:`).
//! - Results are best-effort guesses. A miss yields an empty field, never an error.
//! - Specs are testable offline against inline fixtures.
//!
//! In short: **`specs` knows how to read the pages.** Other layers decide when to
//! fetch, what to keep and where to write it.
pub mod champion;
pub mod discovery;
pub mod item;

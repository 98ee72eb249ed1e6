// src/model/mod.rs
//! Record types for the three persisted entities plus the directory indexes.
//!
//! Every record carries a flattened `extra` map so fields this crate does not
//! model survive a load/patch/save cycle untouched. Optional fields stay absent
//! on output when they were absent on input.
pub mod champion;
pub mod index;
pub mod item;
pub mod rune;

pub use champion::{compare_lane_builds, BuildCategory, Builds, Champion, ChampionInfo, LaneBuild, LaneDifference, RunePage};
pub use index::{ItemIndex, ItemIndexEntry, RuneIndex, RuneIndexEntry};
pub use item::{Item, Stat, StatKind};
pub use rune::Rune;

// src/lib.rs
// #![allow(dead_code)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod specs;

pub mod loader;
pub mod organize;
pub mod patch;
pub mod progress;
pub mod scrape;
pub mod store;
pub mod validate;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};

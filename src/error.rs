// src/error.rs
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parse: {0}")]
    Parse(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io { path: path.as_ref().to_path_buf(), source }
    }

    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Error::Json { path: path.as_ref().to_path_buf(), source }
    }

    /// True for an HTTP 404, the only status that triggers URL correction.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Status { status, .. } => *status == 404,
            Error::Http(e) => e.status().map(|s| s.as_u16()) == Some(404),
            _ => false,
        }
    }

    /// Short label used when grouping failures in the error report.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Http(e) if e.is_timeout() => "timeout",
            Error::Http(_) => "http",
            Error::Status { .. } => "status",
            Error::Io { .. } => "io",
            Error::Json { .. } => "json",
            Error::Parse(_) => "parse",
            Error::NotFound(_) => "not_found",
            Error::Interrupted => "interrupted",
        }
    }
}

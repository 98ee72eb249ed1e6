// src/core/net.rs

// Blocking HTTP behind a small trait so orchestration can run against fakes.

use std::{thread, time::Duration};

use reqwest::blocking::Client;

use crate::config::options::NetOptions;
use crate::error::{Error, Result};

pub trait Fetch: Send + Sync {
    /// GET a page body. Non-2xx answers are `Error::Status`.
    fn get(&self, url: &str) -> Result<String>;

    /// HEAD a URL and report the status code.
    fn status(&self, url: &str) -> Result<u16>;

    /// A URL is live when HEAD answers 200. Transport errors count as dead.
    fn exists(&self, url: &str) -> bool {
        match self.status(url) {
            Ok(code) => code == 200,
            Err(e) => {
                logd!("HEAD {url} failed: {e}");
                false
            }
        }
    }
}

pub struct HttpClient {
    client: Client,
    head_timeout: Duration,
}

impl HttpClient {
    pub fn new(opts: &NetOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()?;
        Ok(Self { client, head_timeout: Duration::from_secs(opts.head_timeout_secs) })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<String> {
        logd!("GET {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { url: s!(url), status: status.as_u16() });
        }
        Ok(resp.text()?)
    }

    fn status(&self, url: &str) -> Result<u16> {
        let resp = self.client.head(url).timeout(self.head_timeout).send()?;
        Ok(resp.status().as_u16())
    }
}

/// Politeness sleep. Zero is a no-op.
pub fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Run `op` up to `1 + retries` times, doubling the pause after each failure.
/// The closure gets the zero-based attempt number.
pub fn retry_with_backoff<T>(
    retries: usize,
    base_ms: u64,
    mut op: impl FnMut(usize) -> Result<T>,
) -> Result<T> {
    let mut delay = base_ms;
    let mut attempt = 0;
    loop {
        match op(attempt) {
            Ok(v) => return Ok(v),
            Err(e) if attempt < retries => {
                logd!("attempt {} failed: {e}; retrying in {delay} ms", attempt + 1);
                pause(delay);
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

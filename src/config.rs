use std::time::Duration;

use anyhow::{ensure, Context};

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://world.openfoodfacts.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream_base_url: String,
    pub upstream_timeout: Duration,
    pub search_limit: usize,
    pub seed_sample_items: bool,
    pub metrics_max_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5555,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(6),
            search_limit: 5,
            seed_sample_items: true,
            metrics_max_entries: crate::metrics::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let timeout_secs: u64 = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => v.parse().context("UPSTREAM_TIMEOUT_SECS must be a valid number")?,
            None => defaults.upstream_timeout.as_secs(),
        };
        ensure!(
            (1..=60).contains(&timeout_secs),
            "UPSTREAM_TIMEOUT_SECS must be between 1 and 60"
        );

        let search_limit: usize = match var("SEARCH_LIMIT") {
            Some(v) => v.parse().context("SEARCH_LIMIT must be a valid number")?,
            None => defaults.search_limit,
        };
        ensure!(
            (1..=50).contains(&search_limit),
            "SEARCH_LIMIT must be between 1 and 50"
        );

        let metrics_max_entries: usize = match var("METRICS_MAX_ENTRIES") {
            Some(v) => v.parse().context("METRICS_MAX_ENTRIES must be a valid number")?,
            None => defaults.metrics_max_entries,
        };
        ensure!(
            (1..=1_000_000).contains(&metrics_max_entries),
            "METRICS_MAX_ENTRIES must be between 1 and 1000000"
        );

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(v) => v.parse().context("PORT must be a valid number")?,
                None => defaults.port,
            },
            upstream_base_url: var("UPSTREAM_BASE_URL").unwrap_or(defaults.upstream_base_url),
            upstream_timeout: Duration::from_secs(timeout_secs),
            search_limit,
            seed_sample_items: match var("SEED_SAMPLE_ITEMS") {
                Some(v) => parse_bool(&v).context("SEED_SAMPLE_ITEMS must be true or false")?,
                None => defaults.seed_sample_items,
            },
            metrics_max_entries,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Identity store connection settings.
//!
//! The REST store is enabled only when both `IDENTITY_STORE_URL` and
//! `IDENTITY_STORE_KEY` are set; otherwise the backend falls back to an empty
//! in-memory store.

use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL without trailing slash, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Service key sent as `apikey` and bearer token
    pub service_key: String,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Returns `None` when either variable is missing or blank.
    pub fn from_env() -> Option<Self> {
        let url = env::var("IDENTITY_STORE_URL").ok()?;
        let key = env::var("IDENTITY_STORE_KEY").ok()?;
        if url.trim().is_empty() || key.trim().is_empty() {
            return None;
        }

        let mut config = Self::new(&url, key.trim());
        if let Some(secs) = env::var("IDENTITY_STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Some(config)
    }
}

use std::time::Duration;

use log::*;
use upg_common::Secret;

const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:3005";
const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the execution service, without a trailing slash. e.g. "https://engine.example.com"
    pub url: String,
    pub access_token: Secret<String>,
    /// Applied to every request. There are no retries, so this bounds how long a handler waits on the engine.
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { url: DEFAULT_ENGINE_URL.to_string(), access_token: Secret::default(), timeout: DEFAULT_ENGINE_TIMEOUT }
    }
}

impl EngineConfig {
    pub fn new_from_env_or_default() -> Self {
        let url = std::env::var("UPG_ENGINE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| {
                warn!("🔗️ UPG_ENGINE_URL not set, using {DEFAULT_ENGINE_URL} as default");
                DEFAULT_ENGINE_URL.to_string()
            });
        let access_token = Secret::new(std::env::var("UPG_ENGINE_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("🔗️ UPG_ENGINE_ACCESS_TOKEN not set. Requests to the execution service will be rejected.");
            String::default()
        }));
        let timeout = std::env::var("UPG_ENGINE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🔗️ Invalid configuration value for UPG_ENGINE_TIMEOUT_SECS. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_ENGINE_TIMEOUT);
        Self { url, access_token, timeout }
    }
}

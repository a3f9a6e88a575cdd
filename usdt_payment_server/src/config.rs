use std::env;

use chrono::Duration;
use log::*;
use upg_common::{helpers::parse_boolean_flag, Chain};
use usdt_payment_engine::upg_api::collection_api::MAX_COLLECTION_GUARD_SECS;
use wallet_sdk::EngineConfig;

const DEFAULT_UPG_HOST: &str = "127.0.0.1";
const DEFAULT_UPG_PORT: u16 = 8370;
const DEFAULT_COLLECTION_GUARD_SECS: i64 = 600;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_forwarded: bool,
    /// The chain used for requests that do not specify one.
    pub default_chain: Chain,
    /// While a collection from a store is unresolved and younger than this, new collections from that store are
    /// refused. Zero disables the check.
    pub collection_guard: Duration,
    /// Execution service client configuration
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_UPG_HOST.to_string(),
            port: DEFAULT_UPG_PORT,
            database_url: String::default(),
            use_x_forwarded_for: false,
            use_forwarded: false,
            default_chain: Chain::default(),
            collection_guard: Duration::seconds(DEFAULT_COLLECTION_GUARD_SECS),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("UPG_HOST").ok().unwrap_or_else(|| DEFAULT_UPG_HOST.into());
        let port = env::var("UPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for UPG_PORT. {e} Using the default, {DEFAULT_UPG_PORT}, instead."
                    );
                    DEFAULT_UPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_UPG_PORT);
        let database_url = env::var("UPG_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ UPG_DATABASE_URL is not set. Please set it to the URL for the gateway database.");
            String::default()
        });
        let use_x_forwarded_for = parse_boolean_flag(env::var("UPG_USE_X_FORWARDED_FOR").ok(), false);
        let use_forwarded = parse_boolean_flag(env::var("UPG_USE_FORWARDED").ok(), false);
        let default_chain = env::var("UPG_DEFAULT_CHAIN")
            .ok()
            .and_then(|s| {
                s.parse::<Chain>()
                    .map_err(|e| warn!("🪛️ Invalid value for UPG_DEFAULT_CHAIN. {e}. Using {}", Chain::default()))
                    .ok()
            })
            .unwrap_or_default();
        let collection_guard = configure_collection_guard();
        let engine = EngineConfig::new_from_env_or_default();
        Self {
            host,
            port,
            database_url,
            use_x_forwarded_for,
            use_forwarded,
            default_chain,
            collection_guard,
            engine,
        }
    }

    pub fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig { use_x_forwarded_for: self.use_x_forwarded_for, use_forwarded: self.use_forwarded }
    }
}

fn configure_collection_guard() -> Duration {
    let secs = env::var("UPG_COLLECTION_GUARD_SECS")
        .ok()
        .and_then(|s| {
            s.trim()
                .parse::<i64>()
                .map_err(|e| {
                    warn!(
                        "🪛️ Invalid value for UPG_COLLECTION_GUARD_SECS: {s}. {e}. Using the default of \
                         {DEFAULT_COLLECTION_GUARD_SECS}s."
                    )
                })
                .ok()
        })
        .unwrap_or(DEFAULT_COLLECTION_GUARD_SECS);
    guard_from_secs(secs)
}

fn guard_from_secs(secs: i64) -> Duration {
    if secs <= 0 {
        warn!("🪛️ The collection guard is disabled. Concurrent collections from the same store will not be blocked.");
        return Duration::zero();
    }
    if secs > MAX_COLLECTION_GUARD_SECS {
        warn!(
            "🪛️ UPG_COLLECTION_GUARD_SECS of {secs} is longer than a day. Using {MAX_COLLECTION_GUARD_SECS}s instead."
        );
    }
    let secs = secs.min(MAX_COLLECTION_GUARD_SECS);
    info!("🪛️ Unresolved collections block new ones from the same store for {secs}s");
    Duration::seconds(secs)
}

/// How to work out the client's IP address when running behind a reverse proxy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyConfig {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

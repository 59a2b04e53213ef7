//! Service configuration
//!
//! Defaults reproduce the stock deployment: a 1000-plate filter at a 10%
//! target error rate, 1000 seeded sample plates and the three local
//! front-end origins. Every field can be overridden through `VC_*`
//! environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use vc_bloom_filter::{FilterError, LifecycleConfig, DEFAULT_BUILD_TIMEOUT};
use vc_vehicle_store::DEFAULT_SEED_COUNT;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STORE_PATH: &str = "data/vehicles.jsonl";

/// CORS configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API; `*` mirrors any origin
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost".to_string(),
                "https://localhost:3000".to_string(),
                "http://localhost:8050".to_string(),
            ],
            allow_credentials: true,
            max_age: 600,
        }
    }
}

/// Top-level service configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Filter sizing and startup retry policy
    pub lifecycle: LifecycleConfig,
    /// Upper bound on a single build, source reads included
    pub build_timeout: Duration,
    /// Periodic rebuild cadence; `None` disables the background task
    pub rebuild_interval: Option<Duration>,
    /// JSON-lines vehicle file
    pub store_path: PathBuf,
    /// Sample plates written when the store starts out empty
    pub seed_count: usize,
    pub cors: CorsConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            lifecycle: LifecycleConfig::default(),
            build_timeout: DEFAULT_BUILD_TIMEOUT,
            rebuild_interval: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            seed_count: DEFAULT_SEED_COUNT,
            cors: CorsConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `VC_*` key
    ///
    /// Malformed values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = parse_var(&lookup, "VC_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "VC_PORT") {
            config.port = port;
        }
        if let Some(capacity) = parse_var(&lookup, "VC_FILTER_CAPACITY") {
            config.lifecycle.parameters.capacity = capacity;
        }
        if let Some(rate) = parse_var(&lookup, "VC_FILTER_ERROR_RATE") {
            config.lifecycle.parameters.target_error_rate = rate;
        }
        if let Some(path) = lookup("VC_STORE_PATH").filter(|p| !p.trim().is_empty()) {
            config.store_path = PathBuf::from(path.trim());
        }
        if let Some(count) = parse_var(&lookup, "VC_SEED_COUNT") {
            config.seed_count = count;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "VC_BUILD_TIMEOUT_SECS") {
            if secs == 0 {
                warn!("VC_BUILD_TIMEOUT_SECS must be positive, keeping default");
            } else {
                config.build_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "VC_REBUILD_INTERVAL_SECS") {
            config.rebuild_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(origins) = lookup("VC_CORS_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        config
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        self.lifecycle.validate()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring malformed environment override");
            None
        }
    }
}

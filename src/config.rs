use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NBA_SEASON: &str = "2024-25";
const DEFAULT_NHL_SEASON: &str = "20242025";
const DEFAULT_MLB_SEASON: &str = "2025";

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub odds_api_key: Option<String>,
    pub bind_addr: String,
    pub cache_ttl: Duration,
    /// When set, responses are cached as files here instead of in memory
    pub cache_dir: Option<PathBuf>,
    pub http_timeout: Duration,
    pub nba_season: String,
    pub nhl_season: String,
    pub mlb_season: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odds_api_key: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_dir: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            nba_season: DEFAULT_NBA_SEASON.to_string(),
            nhl_season: DEFAULT_NHL_SEASON.to_string(),
            mlb_season: DEFAULT_MLB_SEASON.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and build the config from environment variables
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unparseable numbers fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let odds_api_key = non_empty("ODDS_API_KEY");
        if odds_api_key.is_none() {
            tracing::warn!("ODDS_API_KEY is not set, odds will not be attached");
        }

        let secs = |key: &str, default: Duration| {
            non_empty(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            odds_api_key,
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cache_ttl: secs("CACHE_TTL_SECS", defaults.cache_ttl),
            cache_dir: non_empty("CACHE_DIR").map(PathBuf::from),
            http_timeout: secs("HTTP_TIMEOUT_SECS", defaults.http_timeout),
            nba_season: non_empty("NBA_SEASON").unwrap_or(defaults.nba_season),
            nhl_season: non_empty("NHL_SEASON").unwrap_or(defaults.nhl_season),
            mlb_season: non_empty("MLB_SEASON").unwrap_or(defaults.mlb_season),
        }
    }
}

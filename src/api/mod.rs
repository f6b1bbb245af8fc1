pub mod cache;
pub mod http;
pub mod mlb;
pub mod nba;
pub mod nhl;
pub mod odds_api;

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use cache::{DiskCache, MemoryCache, ResponseCache};
use http::HttpFetcher;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Query parameters. Ordered so that identical requests build identical cache keys.
pub type Params = BTreeMap<String, String>;

/// One GET against a provider, served from cache when possible
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str, params: &Params) -> Result<Value>;
}

/// Build a `Params` map from string pairs
pub fn params<const N: usize>(pairs: [(&str, &str); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const NBA_STATS_BASE_URL: &str = "https://stats.nba.com/stats/";
const NHL_WEB_BASE_URL: &str = "https://api-web.nhle.com/v1/";
const MLB_STATS_BASE_URL: &str = "https://statsapi.mlb.com/api/v1/";
const ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4/sports/";

/// The cache every provider client shares, picked from the config
pub fn build_cache(config: &Config) -> Arc<dyn ResponseCache> {
    match &config.cache_dir {
        Some(dir) => Arc::new(DiskCache::new(dir.clone())),
        None => Arc::new(MemoryCache::new()),
    }
}

pub fn nba_stats_fetcher(config: &Config, cache: Arc<dyn ResponseCache>) -> Result<HttpFetcher> {
    Ok(HttpFetcher::new(
        "nba",
        NBA_STATS_BASE_URL,
        cache,
        config.cache_ttl,
        config.http_timeout,
    )?
    .with_header("Host", "stats.nba.com")
    .with_header(
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:72.0) Gecko/20100101 Firefox/72.0",
    )
    .with_header("Accept", "application/json, text/plain, */*")
    .with_header("Accept-Language", "en-US,en;q=0.5")
    .with_header("x-nba-stats-origin", "stats")
    .with_header("x-nba-stats-token", "true")
    .with_header("Referer", "https://stats.nba.com/")
    .with_header("Pragma", "no-cache")
    .with_header("Cache-Control", "no-cache"))
}

pub fn nhl_web_fetcher(config: &Config, cache: Arc<dyn ResponseCache>) -> Result<HttpFetcher> {
    Ok(HttpFetcher::new(
        "nhl",
        NHL_WEB_BASE_URL,
        cache,
        config.cache_ttl,
        config.http_timeout,
    )?
    .with_header(
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36",
    )
    .with_header("Accept", "*/*")
    .with_header("Origin", "https://www.nhl.com")
    .with_header("Referer", "https://www.nhl.com/"))
}

pub fn mlb_stats_fetcher(config: &Config, cache: Arc<dyn ResponseCache>) -> Result<HttpFetcher> {
    Ok(HttpFetcher::new(
        "mlb",
        MLB_STATS_BASE_URL,
        cache,
        config.cache_ttl,
        config.http_timeout,
    )?
    .with_header("User-Agent", "Mozilla/5.0 (compatible; MLBBot/1.0)")
    .with_header("Accept", "application/json"))
}

pub fn odds_api_fetcher(config: &Config, cache: Arc<dyn ResponseCache>) -> Result<HttpFetcher> {
    Ok(HttpFetcher::new(
        "odds",
        ODDS_API_BASE_URL,
        cache,
        config.cache_ttl,
        config.http_timeout,
    )?
    .with_header("Accept", "application/json")
    .with_secret_param("apiKey", config.odds_api_key.as_deref().unwrap_or_default()))
}

use super::cache::ResponseCache;
use super::{Fetcher, Params};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Cached JSON GET client for one provider
pub struct HttpFetcher {
    name: &'static str,
    client: Client,
    base_url: String,
    headers: HeaderMap,
    /// Sent with every request but kept out of the cache key (api keys)
    secret_params: Params,
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl HttpFetcher {
    pub fn new(
        name: &'static str,
        base_url: &str,
        cache: Arc<dyn ResponseCache>,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|source| Error::Http {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            name,
            client,
            base_url: base_url.to_string(),
            headers: HeaderMap::new(),
            secret_params: Params::new(),
            cache,
            ttl,
        })
    }

    /// Add a default header. Invalid names or values are ignored with a warning.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => tracing::warn!("{}: ignoring invalid header {}", self.name, name),
        }
        self
    }

    pub fn with_secret_param(mut self, key: &str, value: &str) -> Self {
        self.secret_params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full request URL for an endpoint, without the secret params
    pub fn url_for(&self, endpoint: &str, params: &Params) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        let url = if params.is_empty() {
            Url::parse(&joined)
        } else {
            Url::parse_with_params(&joined, params.iter())
        };
        url.map_err(|e| Error::InvalidParameter(format!("bad url {}: {}", joined, e)))
    }

    async fn fetch_live(&self, url: &Url) -> Result<String> {
        let mut request_url = url.clone();
        if !self.secret_params.is_empty() {
            request_url
                .query_pairs_mut()
                .extend_pairs(self.secret_params.iter());
        }

        let response = self
            .client
            .get(request_url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let url = self.url_for(endpoint, params)?;
        let key = url.to_string();

        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_str::<Value>(&cached) {
                Ok(value) => {
                    tracing::debug!("{}: cache hit for {}", self.name, key);
                    return Ok(value);
                }
                Err(e) => tracing::warn!("{}: cached body for {} is invalid: {}", self.name, key, e),
            }
        } else {
            tracing::debug!("{}: cache miss for {}", self.name, key);
        }

        let body = self.fetch_live(&url).await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| Error::Shape(format!("{} returned invalid JSON: {}", key, e)))?;

        if let Err(e) = self.cache.put(&key, body, self.ttl).await {
            tracing::warn!("{}: failed to cache {}: {}", self.name, key, e);
        }

        Ok(value)
    }
}

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Best-effort response cache keyed by request URL
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns the cached body, or `None` on a miss or an expired entry
    async fn get(&self, key: &str) -> Option<String>;

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}

/// In-process cache. Expired entries are dropped on read and swept on every write.
#[derive(Default)]
pub struct MemoryCache {
    /// `None` expiry: kept until the process exits
    entries: RwLock<HashMap<String, (Option<Instant>, String)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn is_live(expires: Option<Instant>, now: Instant) -> bool {
    expires.map_or(true, |at| at > now)
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((expires, body)) if is_live(*expires, Instant::now()) => return Some(body.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Expired
        self.entries.write().await.remove(key);
        None
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let expires = now.checked_add(ttl);

        let mut entries = self.entries.write().await;
        entries.retain(|_, (at, _)| is_live(*at, now));
        entries.insert(key.to_string(), (expires, value));
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    key: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    body: String,
}

/// File-backed cache: one JSON file per key, named by the SHA-256 of the key.
/// Expired files are deleted when they are next read.
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        let name: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl ResponseCache for DiskCache {
    async fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        let raw = tokio::fs::read_to_string(&path).await.ok()?;

        let envelope: CacheEnvelope = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache file {:?}: {}", path, e);
                return None;
            }
        };

        if envelope.key != key {
            return None;
        }
        if envelope.expires_at.is_some_and(|at| at <= Utc::now()) {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::debug!("Could not remove expired cache file {:?}: {}", path, e);
            }
            return None;
        }
        Some(envelope.body)
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        let envelope = CacheEnvelope {
            key: key.to_string(),
            expires_at,
            body: value,
        };
        let json = serde_json::to_string(&envelope)?;
        tokio::fs::write(self.path_for(key), json).await?;
        Ok(())
    }
}

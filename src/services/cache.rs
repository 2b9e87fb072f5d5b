use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct CachedEntry {
    json: Arc<String>,
    expires_at: Instant,
}

/// Upper bound on how long anything stays in L1, whatever its own TTL
const L1_MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Multi-tier cache manager
///
/// L1 is an in-process moka cache; L2 is an optional Redis instance shared
/// across replicas. Every entry carries its own TTL so widgets with different
/// refresh intervals can share one manager.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, CachedEntry>,
}

impl CacheManager {
    /// Create an L1-only cache manager
    pub fn in_memory(l1_size: u64) -> Self {
        Self {
            redis: None,
            l1_cache: build_l1(l1_size),
        }
    }

    /// Create a cache manager backed by Redis
    pub async fn with_redis(redis_url: &str, l1_size: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            l1_cache: build_l1(l1_size),
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        if let Some(entry) = self.l1_cache.get(key).await {
            if Instant::now() < entry.expires_at {
                tracing::trace!("L1 cache hit: {}", key);
                return Ok(Some(serde_json::from_str(&entry.json)?));
            }
            self.l1_cache.invalidate(key).await;
        }

        let Some(redis) = &self.redis else {
            tracing::trace!("Cache miss: {}", key);
            return Ok(None);
        };

        let mut conn = redis.lock().await;
        let (value, ttl): (Option<String>, i64) = redis::pipe()
            .cmd("GET")
            .arg(key)
            .cmd("TTL")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let parsed = serde_json::from_str(&json)?;

                // Populate L1 for the remainder of the L2 lifetime
                if ttl > 0 {
                    self.insert_l1(key, json, Duration::from_secs(ttl as u64)).await;
                }
                Ok(Some(parsed))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Set a value in both tiers with the given TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(ttl.as_secs().max(1))
                .arg(&json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        self.insert_l1(key, json, ttl).await;

        tracing::trace!("Cache set: {} (ttl {}s)", key, ttl.as_secs());
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut *conn)
                .await?;
        }
        Ok(())
    }

    async fn insert_l1(&self, key: &str, json: String, ttl: Duration) {
        let entry = CachedEntry {
            json: Arc::new(json),
            expires_at: Instant::now() + ttl,
        };
        self.l1_cache.insert(key.to_string(), entry).await;
    }
}

fn build_l1(l1_size: u64) -> moka::future::Cache<String, CachedEntry> {
    moka::future::CacheBuilder::new(l1_size)
        .time_to_live(L1_MAX_TTL)
        .build()
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the weather widget
    pub fn weather(country: &str) -> String {
        format!("widgets:weather:{}", country)
    }

    /// Build a cache key for the exchange rate widget
    pub fn exchange_rate(currency: &str) -> String {
        format!("widgets:currency:{}", currency)
    }
}

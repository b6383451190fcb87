use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

/// Redis 缓存后端，所有键统一加上配置的前缀
pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis_config.url))?;

        // 启动时先 PING 一次，失败则由调用方回退到内存缓存
        let mut conn = client
            .get_connection()
            .map_err(|e| format!("Redis connect failed ({}): {e}", redis_config.url))?;
        let pong: String = redis::cmd("PING")
            .query(&mut conn)
            .map_err(|e| format!("Redis ping failed: {e}"))?;
        debug!(
            "Redis cache ready ({}), prefix '{}', default TTL {}s",
            pong, redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                None
            }
        }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET '{}' failed: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let ttl = if ttl == 0 { self.default_ttl } else { ttl };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.prefixed(&key), value, ttl)
            .await
        {
            error!("Redis SETEX '{}' failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        if let Err(e) = conn.del::<_, i32>(self.prefixed(key)).await {
            error!("Redis DEL '{}' failed: {}", key, e);
        }
    }

    async fn invalidate_all(&self) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        // 只清理本应用前缀下的键
        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Redis KEYS '{}' failed: {}", pattern, e);
                return;
            }
        };

        if !keys.is_empty()
            && let Err(e) = conn.del::<_, i32>(keys).await
        {
            error!("Failed to invalidate cache keys: {}", e);
        }
    }
}

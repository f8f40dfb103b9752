use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::future::Future;

use super::KvStore;
use crate::resilience::timeout::REDIS_OPERATION_TIMEOUT;
use crate::{Error, Result};

/// Redis-backed store sharing one auto-reconnecting connection
#[derive(Clone)]
pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    async fn run<T, F>(op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>> + Send,
    {
        match tokio::time::timeout(REDIS_OPERATION_TIMEOUT, fut).await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => Err(Error::Internal(format!("Redis {op} timed out"))),
        }
    }
}

impl std::fmt::Debug for RedisKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKvStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        Self::run("GET", async move { conn.get(key).await }).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        Self::run("SET", async move { conn.set(key, value).await }).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        Self::run("DEL", async move { conn.del(key).await }).await
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        Self::run("SADD", async move { conn.sadd(key, member).await }).await
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        Self::run("SREM", async move { conn.srem(key, member).await }).await
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        Self::run("SMEMBERS", async move { conn.smembers(key).await }).await
    }
}

//! Read-through cache for raw response bodies, keyed by request path.

use crate::error::ClientResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[async_trait]
pub trait Cache: Send + Sync {
    /// `Ok(None)` is a miss. An error is treated as a miss by the client.
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;

    async fn set(&self, key: &str, body: String) -> ClientResult<()>;
}

/// Process-local [`Cache`]. Entries never expire.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, body: String) -> ClientResult<()> {
        self.entries.write().await.insert(key.to_owned(), body);
        Ok(())
    }
}

//! # Transport Back-Reference
//!
//! Resources keep a [`TransportHandle`] so they can load related data after hydration.
//! The handle holds a `Weak` reference: the transport owns the hydrator, the hydrator
//! stamps the handle into every resource it creates, and the resource must never keep
//! the transport alive on its own.
//!
//! ```text
//! Client (Arc<dyn Transport>) ──owns──> Hydrator ──creates──> Resource
//!        ^                                                      │
//!        └─────────────────── Weak (TransportHandle) ───────────┘
//! ```

use crate::error::{HydratorError, HydratorResult};
use crate::hydrator::Hydrator;
use crate::resource::Resource;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Weak};

/// The collaborator that fetches JSON and owns the hydrator.
#[async_trait]
pub trait Transport: Send + Sync {
    fn hydrator(&self) -> &Hydrator;

    /// Fetches the decoded JSON body for `path`. `refresh` bypasses any cache read.
    async fn request(&self, path: &str, refresh: bool) -> HydratorResult<Value>;
}

/// Non-owning reference from a resource to its transport.
#[derive(Clone, Default)]
pub struct TransportHandle {
    transport: Option<Weak<dyn Transport>>,
}

impl TransportHandle {
    pub fn new(transport: Weak<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A handle that never resolves. Resources built outside a transport carry this.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.transport
            .as_ref()
            .is_some_and(|transport| transport.strong_count() > 0)
    }

    pub fn upgrade(&self) -> HydratorResult<Arc<dyn Transport>> {
        self.transport
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(HydratorError::TransportGone)
    }

    /// Hydrates `json` as the resource `short_name` using the transport's hydrator.
    pub fn hydrate(&self, short_name: &str, json: Value) -> HydratorResult<Box<dyn Resource>> {
        let transport = self.upgrade()?;
        transport.hydrator().hydrate(short_name, json)
    }

    pub async fn request(&self, path: &str) -> HydratorResult<Value> {
        let transport = self.upgrade()?;
        transport.request(path, false).await
    }

    /// Re-fetches `path` past the cache and hydrates the result as `short_name`.
    pub async fn refresh(&self, path: &str, short_name: &str) -> HydratorResult<Box<dyn Resource>> {
        let transport = self.upgrade()?;
        let json = transport.request(path, true).await?;
        transport.hydrator().hydrate(short_name, json)
    }
}

impl fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Two handles are equal when they point at the same transport, or are both detached.
impl PartialEq for TransportHandle {
    fn eq(&self, other: &Self) -> bool {
        match (&self.transport, &other.transport) {
            (Some(left), Some(right)) => Weak::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_handle_reports_transport_gone() {
        let handle = TransportHandle::detached();
        assert!(!handle.is_attached());
        assert!(matches!(handle.upgrade(), Err(HydratorError::TransportGone)));
        assert_eq!(handle, TransportHandle::default());
        assert_eq!(format!("{handle:?}"), "TransportHandle { attached: false }");
    }
}

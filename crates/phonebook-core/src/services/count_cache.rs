//! Process-wide cache for aggregate counts.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;
use tracing::debug;

use crate::ports::CoreError;

/// Aggregates the cache knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountKey {
    Contacts,
    Departments,
}

/// Caches expensive `COUNT(*)` results until a write path invalidates them.
///
/// There is no TTL: every service that mutates an aggregate must call
/// [`CountCache::invalidate`] for the matching key after a successful write.
#[derive(Debug, Default)]
pub struct CountCache {
    slots: RwLock<HashMap<CountKey, Slot>>,
}

/// Cached value plus the number of invalidations seen for its key.
#[derive(Debug, Default, Clone, Copy)]
struct Slot {
    value: Option<u64>,
    generation: u64,
}

impl CountCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value, or run `load` and remember its result.
    ///
    /// Loader errors are returned as-is and nothing is cached. A result is
    /// only stored if no invalidation for `key` happened while it loaded.
    pub async fn get_or_load<F, Fut>(&self, key: CountKey, load: F) -> Result<u64, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u64, CoreError>>,
    {
        let seen = {
            let slots = self.slots.read().await;
            let slot = slots.get(&key).copied().unwrap_or_default();
            if let Some(value) = slot.value {
                return Ok(value);
            }
            slot.generation
        };

        let value = load().await?;

        let mut slots = self.slots.write().await;
        let slot = slots.entry(key).or_default();
        if slot.generation == seen {
            debug!(?key, value, "Count cache miss");
            slot.value = Some(value);
        } else {
            debug!(?key, value, "Discarding count loaded across an invalidation");
        }
        Ok(value)
    }

    /// Drop the cached value for `key`.
    pub async fn invalidate(&self, key: CountKey) {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key).or_default();
        slot.value = None;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Currently cached value, if any.
    pub async fn peek(&self, key: CountKey) -> Option<u64> {
        self.slots.read().await.get(&key).and_then(|slot| slot.value)
    }
}

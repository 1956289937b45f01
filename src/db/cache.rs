use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{watch, RwLock};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Item, SelectorKey};

/// Async state of one category's result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub loading: bool,
    pub error: bool,
    pub data: Vec<Item>,
}

impl ResultEntry {
    fn pending() -> Self {
        Self {
            loading: true,
            error: false,
            data: Vec::new(),
        }
    }

    fn from_outcome(outcome: AppResult<Vec<Item>>) -> Self {
        match outcome {
            Ok(data) => Self {
                loading: false,
                error: false,
                data,
            },
            Err(_) => Self {
                loading: false,
                error: true,
                data: Vec::new(),
            },
        }
    }

    /// True once the latest dispatched fetch has resolved, successfully or not
    pub fn is_settled(&self) -> bool {
        !self.loading
    }
}

/// Handle for one dispatched fetch
///
/// Only the ticket of the most recent dispatch for a key can resolve that key.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    key: SelectorKey,
    generation: u64,
    request_id: Uuid,
}

impl FetchTicket {
    pub fn key(&self) -> &SelectorKey {
        &self.key
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

struct Slot {
    entry: ResultEntry,
    generation: u64,
}

/// In-memory result store keyed by selector
///
/// Cloning is cheap; all clones share the same state. Writers never hold the lock
/// across an await on the network.
#[derive(Clone)]
pub struct ResultCache {
    slots: Arc<RwLock<HashMap<SelectorKey, Slot>>>,
    changes: Arc<watch::Sender<u64>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            changes: Arc::new(changes),
        }
    }

    /// Marks `key` as loading and issues the ticket for a new fetch
    ///
    /// Any ticket issued earlier for the same key becomes stale.
    pub async fn begin(&self, key: &SelectorKey) -> FetchTicket {
        let generation = {
            let mut slots = self.slots.write().await;
            let slot = slots.entry(key.clone()).or_insert(Slot {
                entry: ResultEntry::pending(),
                generation: 0,
            });
            slot.generation += 1;
            slot.entry = ResultEntry::pending();
            slot.generation
        };

        self.notify();

        FetchTicket {
            key: key.clone(),
            generation,
            request_id: Uuid::new_v4(),
        }
    }

    /// Records the outcome of a fetch
    ///
    /// Returns false, leaving the entry untouched, when a newer fetch for the same
    /// key has been dispatched since `ticket` was issued.
    pub async fn resolve(&self, ticket: &FetchTicket, outcome: AppResult<Vec<Item>>) -> bool {
        let applied = {
            let mut slots = self.slots.write().await;
            match slots.get_mut(&ticket.key) {
                Some(slot) if slot.generation == ticket.generation => {
                    slot.entry = ResultEntry::from_outcome(outcome);
                    true
                }
                _ => false,
            }
        };

        if applied {
            self.notify();
        } else {
            tracing::debug!(
                selector_key = %ticket.key,
                request_id = %ticket.request_id,
                "Discarding stale fetch result"
            );
        }

        applied
    }

    /// Current entry for `key`, if anything was ever dispatched for it
    pub async fn get(&self, key: &SelectorKey) -> Option<ResultEntry> {
        self.slots
            .read()
            .await
            .get(key)
            .map(|slot| slot.entry.clone())
    }

    /// Waits until the latest fetch for `key` has resolved
    ///
    /// Returns `None` immediately for a key that was never dispatched.
    pub async fn wait_settled(&self, key: &SelectorKey) -> Option<ResultEntry> {
        let mut rx = self.changes.subscribe();

        loop {
            let entry = self.get(key).await?;
            if entry.is_settled() {
                return Some(entry);
            }

            // The sender lives as long as `self`, so this only fails on teardown
            if rx.changed().await.is_err() {
                return self.get(key).await;
            }
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version = version.wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::time::Duration;

    fn items(ids: &[u64]) -> Vec<Item> {
        ids.iter().map(|id| Item::new(*id)).collect()
    }

    #[tokio::test]
    async fn test_begin_marks_loading() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("movies.action");

        assert_eq!(cache.get(&key).await, None);

        cache.begin(&key).await;
        let entry = cache.get(&key).await.unwrap();
        assert!(entry.loading);
        assert!(!entry.error);
        assert!(entry.data.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("movies.action");

        let ticket = cache.begin(&key).await;
        assert!(cache.resolve(&ticket, Ok(items(&[1, 2]))).await);

        let entry = cache.get(&key).await.unwrap();
        assert!(!entry.loading);
        assert!(!entry.error);
        assert_eq!(entry.data, items(&[1, 2]));
    }

    #[tokio::test]
    async fn test_resolve_failure() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("movies.action");

        let ticket = cache.begin(&key).await;
        cache
            .resolve(&ticket, Err(AppError::Network("timeout".to_string())))
            .await;

        let entry = cache.get(&key).await.unwrap();
        assert!(!entry.loading);
        assert!(entry.error);
        assert!(entry.data.is_empty());
    }

    #[tokio::test]
    async fn test_new_dispatch_clears_previous_data() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("movies.action");

        let first = cache.begin(&key).await;
        cache.resolve(&first, Ok(items(&[1, 2, 3]))).await;

        cache.begin(&key).await;
        let entry = cache.get(&key).await.unwrap();
        assert!(entry.loading);
        assert!(entry.data.is_empty());
    }

    #[tokio::test]
    async fn test_stale_ticket_discarded() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("movies.action");

        let older = cache.begin(&key).await;
        let newer = cache.begin(&key).await;

        assert!(cache.resolve(&newer, Ok(items(&[3]))).await);
        assert!(!cache.resolve(&older, Ok(items(&[2]))).await);

        assert_eq!(cache.get(&key).await.unwrap().data, items(&[3]));
    }

    #[tokio::test]
    async fn test_stale_ticket_cannot_settle_pending_key() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("series.kids");

        let older = cache.begin(&key).await;
        let _newer = cache.begin(&key).await;

        cache.resolve(&older, Ok(items(&[9]))).await;
        assert!(cache.get(&key).await.unwrap().loading);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = ResultCache::new();
        let action = SelectorKey::from("movies.action");
        let comedy = SelectorKey::from("movies.comedy");

        let a = cache.begin(&action).await;
        let c = cache.begin(&comedy).await;
        cache
            .resolve(&a, Err(AppError::MalformedResponse("no results".to_string())))
            .await;
        cache.resolve(&c, Ok(items(&[7]))).await;

        assert!(cache.get(&action).await.unwrap().error);
        assert_eq!(cache.get(&comedy).await.unwrap().data, items(&[7]));
    }

    #[tokio::test]
    async fn test_wait_settled_unknown_key() {
        let cache = ResultCache::new();
        assert_eq!(cache.wait_settled(&SelectorKey::from("nope")).await, None);
    }

    #[tokio::test]
    async fn test_wait_settled_wakes_on_resolve() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("popular.trending");
        let ticket = cache.begin(&key).await;

        let writer = cache.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            writer.resolve(&ticket, Ok(items(&[42]))).await;
        });

        let entry = tokio::time::timeout(Duration::from_secs(2), cache.wait_settled(&key))
            .await
            .expect("entry should settle")
            .unwrap();
        assert_eq!(entry.data, items(&[42]));
    }

    #[test]
    fn test_ticket_request_ids_are_unique() {
        let cache = ResultCache::new();
        let key = SelectorKey::from("movies.war");

        let (a, b) = tokio_test::block_on(async { (cache.begin(&key).await, cache.begin(&key).await) });
        assert_ne!(a.request_id(), b.request_id());
        assert_eq!(a.key(), &key);
    }
}

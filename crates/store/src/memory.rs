//! In-memory document store
//!
//! A concurrent in-memory implementation of [`DocumentStore`] backed by
//! DashMap. It is the reference backend for tests and demos: fast, no
//! external dependencies, and byte-for-byte the same subscription semantics
//! a networked backend must provide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::backend::{Document, DocumentId, DocumentStore, Filter};
use crate::error::StoreResult;
use crate::subscription::Subscription;

/// Operation counters for the in-memory store.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStoreStats {
    /// Total successful appends.
    pub appends: u64,
    /// Total snapshots fanned out to subscribers.
    pub fanouts: u64,
    /// Currently registered subscriptions.
    pub active_subscriptions: u64,
}

#[derive(Default)]
struct Counters {
    appends: AtomicU64,
    fanouts: AtomicU64,
    active_subscriptions: AtomicU64,
}

struct Subscriber {
    id: u64,
    filter: Filter,
    tx: watch::Sender<Vec<Document>>,
}

#[derive(Default)]
struct Collection {
    docs: Vec<Document>,
    last_created_at: Option<DateTime<Utc>>,
    subscribers: Vec<Subscriber>,
}

impl Collection {
    fn filtered(&self, filter: &Filter) -> Vec<Document> {
        self.docs
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect()
    }
}

/// In-memory [`DocumentStore`] with per-subscriber filtered fan-out.
///
/// Server timestamps are clamped non-decreasing per collection, matching the
/// "monotonic per writer session" guarantee of the original backend. Each
/// append notifies only the subscribers whose filter matches the new
/// document; everyone else's view is unchanged.
pub struct MemoryStore {
    collections: Arc<DashMap<String, Collection>>,
    next_subscriber_id: AtomicU64,
    counters: Arc<Counters>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(DashMap::new()),
            next_subscriber_id: AtomicU64::new(0),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> MemoryStoreStats {
        MemoryStoreStats {
            appends: self.counters.appends.load(Ordering::Relaxed),
            fanouts: self.counters.fanouts.load(Ordering::Relaxed),
            active_subscriptions: self.counters.active_subscriptions.load(Ordering::Relaxed),
        }
    }

    /// Number of documents currently stored under `path`.
    pub fn len(&self, path: &str) -> usize {
        self.collections
            .get(path)
            .map(|c| c.docs.len())
            .unwrap_or(0)
    }

    /// Remove the collection at `path`, closing every live subscription on
    /// it. Subscribers observe [`crate::StoreError::SubscriptionClosed`] on
    /// their next wait. Used to exercise store-side subscription loss.
    pub fn drop_collection(&self, path: &str) {
        if let Some((_, collection)) = self.collections.remove(path) {
            debug!(
                collection = path,
                subscribers = collection.subscribers.len(),
                "dropping collection"
            );
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn append(&self, path: &str, fields: Value) -> StoreResult<DocumentId> {
        let mut collection = self.collections.entry(path.to_string()).or_default();

        // Server timestamp, clamped so createdAt never goes backwards
        // within a collection.
        let mut created_at = Utc::now();
        if let Some(last) = collection.last_created_at {
            if created_at < last {
                created_at = last;
            }
        }
        collection.last_created_at = Some(created_at);

        let doc = Document {
            id: Uuid::new_v4().to_string(),
            created_at,
            fields,
        };
        let id = doc.id.clone();
        collection.docs.push(doc);
        self.counters.appends.fetch_add(1, Ordering::Relaxed);

        let mut fanouts = 0u64;
        for subscriber in &collection.subscribers {
            // Only views the new document lands in have changed.
            let last = collection
                .docs
                .last()
                .filter(|doc| subscriber.filter.matches(doc));
            if last.is_some() {
                let snapshot = collection.filtered(&subscriber.filter);
                // A closed receiver is cleaned up when its guard drops.
                let _ = subscriber.tx.send(snapshot);
                fanouts += 1;
            }
        }
        self.counters.fanouts.fetch_add(fanouts, Ordering::Relaxed);

        trace!(collection = path, id = %id, fanouts, "appended document");
        Ok(id)
    }

    async fn subscribe(&self, path: &str, filter: Filter) -> StoreResult<Subscription> {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);

        let mut collection = self.collections.entry(path.to_string()).or_default();
        let initial = collection.filtered(&filter);
        let (tx, rx) = watch::channel(initial);
        collection.subscribers.push(Subscriber { id, filter, tx });
        drop(collection);

        self.counters
            .active_subscriptions
            .fetch_add(1, Ordering::Relaxed);
        debug!(collection = path, subscriber = id, "subscription opened");

        let collections = Arc::clone(&self.collections);
        let counters = Arc::clone(&self.counters);
        let path = path.to_string();
        Ok(Subscription::new(rx, move || {
            if let Some(mut collection) = collections.get_mut(&path) {
                collection.subscribers.retain(|s| s.id != id);
            }
            counters
                .active_subscriptions
                .fetch_sub(1, Ordering::Relaxed);
            debug!(collection = %path, subscriber = id, "subscription released");
        }))
    }
}

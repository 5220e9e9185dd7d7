//! Document store trait definition
//!
//! This module defines the core [`DocumentStore`] trait that all persistence
//! implementations must implement. The trait provides a deliberately small
//! interface: append a document under a collection path, and subscribe to a
//! filtered, live-updated view of a collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;
use crate::subscription::Subscription;

/// Store-assigned document identifier. Unique within a store, never reused.
pub type DocumentId = String;

/// A stored document: the store-assigned envelope plus the caller's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// Server-assigned timestamp at write time.
    pub created_at: DateTime<Utc>,
    /// Caller-provided document body.
    pub fields: Value,
}

/// An equality filter over one top-level document field.
///
/// Mirrors the `orderByChild(field) + equalTo(value)` query shape of the
/// original realtime-database client: subscriptions are scoped server-side to
/// documents whose `field` equals `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    equals: Value,
}

impl Filter {
    /// Match documents whose top-level `field` equals `value`.
    pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: value.into(),
        }
    }

    /// Whether the given document passes this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        doc.fields.get(&self.field) == Some(&self.equals)
    }
}

/// Core trait for document store implementations.
///
/// Implementations must ensure appends are atomic and that each subscriber's
/// view is eventually consistent with the latest state of its filtered
/// collection; delivery of every intermediate snapshot is not required.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append a document under `path`.
    ///
    /// The store assigns the document id and `createdAt` timestamp. Exactly
    /// one document is created per successful call; on failure nothing is
    /// persisted, and a retry after a failure of unknown outcome may create a
    /// duplicate.
    async fn append(&self, path: &str, fields: Value) -> StoreResult<DocumentId>;

    /// Open a live, filtered view of the collection at `path`.
    ///
    /// The returned [`Subscription`] starts with the current contents and is
    /// notified on every matching append. It is an owned resource: dropping
    /// it (or calling [`Subscription::unsubscribe`]) releases the view.
    async fn subscribe(&self, path: &str, filter: Filter) -> StoreResult<Subscription>;
}

//! Live collection subscriptions
//!
//! A [`Subscription`] is an explicit owned resource wrapping a cancellable
//! stream of snapshots, rather than a bare callback: releasing it (drop or
//! [`Subscription::unsubscribe`]) detaches the subscriber from the store, so
//! a handler can never fire against a session that is no longer active.

use tokio::sync::watch;

use crate::backend::Document;
use crate::error::{StoreError, StoreResult};

/// A live, filtered view of one collection.
///
/// Built on a [`watch`] channel, so snapshots coalesce: if several appends
/// land before the consumer catches up, only the latest state is observed.
/// Every snapshot is the full current contents of the filtered view.
pub struct Subscription {
    rx: watch::Receiver<Vec<Document>>,
    _guard: SubscriptionGuard,
}

impl Subscription {
    /// Wrap a snapshot receiver with a release action run exactly once when
    /// the subscription is dropped.
    pub fn new(
        rx: watch::Receiver<Vec<Document>>,
        on_release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            rx,
            _guard: SubscriptionGuard {
                on_release: Some(Box::new(on_release)),
            },
        }
    }

    /// The current snapshot, marking it as seen.
    pub fn snapshot(&mut self) -> Vec<Document> {
        self.rx.borrow_and_update().clone()
    }

    /// Wait until a snapshot newer than the last seen one is available.
    ///
    /// Returns [`StoreError::SubscriptionClosed`] once the store side has
    /// gone away.
    pub async fn changed(&mut self) -> StoreResult<()> {
        self.rx
            .changed()
            .await
            .map_err(|_| StoreError::SubscriptionClosed)
    }

    /// Wait for and return the next unseen snapshot.
    pub async fn next_snapshot(&mut self) -> StoreResult<Vec<Document>> {
        self.changed().await?;
        Ok(self.snapshot())
    }

    /// Release the subscription explicitly. Equivalent to dropping it.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct SubscriptionGuard {
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

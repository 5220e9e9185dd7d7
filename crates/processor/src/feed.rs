//! Live feedback feed
//!
//! A worker task that keeps a derived [`FeedbackView`] in step with the
//! authenticated session and the store. On every identity change the old
//! subscription is released before a new one is opened, so a snapshot can
//! never be delivered against a session that is no longer active. Views are
//! published on a watch channel and coalesce: consumers always observe the
//! latest state, not necessarily every intermediate one.

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use opina_types::Session;
use store::{Document, DocumentStore, Filter, StoreResult, Subscription};

use crate::snapshot::{aggregate, FeedbackView};

/// Document field the per-user subscription filters on.
const USER_ID_FIELD: &str = "userId";

/// Handle to the live feed worker.
///
/// Dropping the handle aborts the worker; prefer [`FeedbackFeed::shutdown`]
/// for an orderly release of the subscription.
pub struct FeedbackFeed {
    handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FeedbackFeed {
    /// Start the feed worker against `collection`, following `sessions`.
    ///
    /// Returns the handle and the receiver of published views. The first
    /// published view reflects the session current at start time; a
    /// signed-out state always maps to [`FeedbackView::empty`].
    pub fn start(
        store: Arc<dyn DocumentStore>,
        sessions: watch::Receiver<Option<Session>>,
        collection: impl Into<String>,
    ) -> (Self, watch::Receiver<FeedbackView>) {
        let collection = collection.into();
        let (view_tx, view_rx) = watch::channel(FeedbackView::empty());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(run_feed(
            store,
            sessions,
            collection,
            view_tx,
            shutdown_rx,
        ));

        (
            Self {
                handle,
                shutdown_tx: Some(shutdown_tx),
            },
            view_rx,
        )
    }

    /// Stop the worker and release the subscription.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            error!(error = %e, "feed worker did not shut down cleanly");
        }
    }
}

impl Drop for FeedbackFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_feed(
    store: Arc<dyn DocumentStore>,
    mut sessions: watch::Receiver<Option<Session>>,
    collection: String,
    view_tx: watch::Sender<FeedbackView>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    info!(collection = %collection, "feedback feed started");

    let current = sessions.borrow_and_update().clone();
    let mut subscription = open_view(&store, &collection, current.as_ref()).await;
    publish_current(&view_tx, subscription.as_mut());

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                debug!("feed shutdown requested");
                break;
            }
            changed = sessions.changed() => {
                if changed.is_err() {
                    debug!("session stream closed, stopping feed");
                    break;
                }
                // Release the old view before touching the new identity.
                subscription = None;
                let current = sessions.borrow_and_update().clone();
                subscription = open_view(&store, &collection, current.as_ref()).await;
                publish_current(&view_tx, subscription.as_mut());
            }
            result = next_snapshot(&mut subscription) => {
                match result {
                    Ok(docs) => {
                        let _ = view_tx.send(aggregate(&docs));
                    }
                    Err(e) => {
                        warn!(error = %e, "subscription lost, showing empty view");
                        subscription = None;
                        let _ = view_tx.send(FeedbackView::empty());
                    }
                }
            }
        }
    }

    // Subscription (if any) is released here with the worker.
    info!(collection = %collection, "feedback feed stopped");
}

async fn open_view(
    store: &Arc<dyn DocumentStore>,
    collection: &str,
    session: Option<&Session>,
) -> Option<Subscription> {
    let session = session?;
    match store
        .subscribe(
            collection,
            Filter::field_equals(USER_ID_FIELD, session.uid.clone()),
        )
        .await
    {
        Ok(subscription) => Some(subscription),
        Err(e) => {
            warn!(user = %session.uid, error = %e, "could not open feedback subscription");
            None
        }
    }
}

fn publish_current(view_tx: &watch::Sender<FeedbackView>, subscription: Option<&mut Subscription>) {
    let view = match subscription {
        Some(sub) => aggregate(&sub.snapshot()),
        None => FeedbackView::empty(),
    };
    let _ = view_tx.send(view);
}

async fn next_snapshot(subscription: &mut Option<Subscription>) -> StoreResult<Vec<Document>> {
    match subscription {
        Some(sub) => sub.next_snapshot().await,
        // No active subscription: park until another branch wins.
        None => std::future::pending().await,
    }
}

//! End-to-end tests for the live feedback feed
//!
//! These wire the real pipeline together: in-memory identity provider and
//! store, the submitter on the write side, the feed worker on the read side.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use auth::{IdentityProvider, MemoryIdentityProvider};
use collector::{validate, FeedbackSubmitter};
use opina_config::OpinaConfig;
use processor::{FeedbackFeed, FeedbackView};
use store::MemoryStore;

async fn wait_for_view<F>(views: &mut watch::Receiver<FeedbackView>, mut pred: F) -> FeedbackView
where
    F: FnMut(&FeedbackView) -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let view = views.borrow_and_update().clone();
            if pred(&view) {
                return view;
            }
            views.changed().await.expect("feed closed unexpectedly");
        }
    })
    .await
    .expect("timed out waiting for view")
}

async fn wait_until<F>(mut cond: F)
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}

#[tokio::test]
async fn submitted_feedback_appears_in_the_live_view() {
    let config = OpinaConfig::default();
    let store = Arc::new(MemoryStore::new());
    let provider = MemoryIdentityProvider::new();
    provider.register("alice.brown@x.com", "secret1", None);

    let (feed, mut views) = FeedbackFeed::start(
        store.clone(),
        provider.sessions(),
        config.store.collection_path.clone(),
    );
    assert_eq!(*views.borrow(), FeedbackView::empty());

    let session = provider.sign_in("alice.brown@x.com", "secret1").await.unwrap();

    let submitter = FeedbackSubmitter::new(store.clone(), config.store.collection_path.clone());
    let (rating, comment) = (4, "Great service overall");
    assert!(validate(rating, comment).ok());
    submitter.submit(&session, rating, comment).await.unwrap();

    let view = wait_for_view(&mut views, |v| v.stats.total == 1).await;
    // No profile display name, so the stored name is derived from the email.
    assert_eq!(view.records[0].user_name, "Alice Brown");
    assert_eq!(view.records[0].rating, 4);
    assert_eq!(view.stats.distribution[&4], 1);
    assert_eq!(view.stats.average, 4.0);

    submitter
        .submit(&session, 4, "Still great, thank you")
        .await
        .unwrap();
    let view = wait_for_view(&mut views, |v| v.stats.total == 2).await;
    assert_eq!(view.stats.distribution[&4], 2);
    // Newest first.
    assert_eq!(view.records[0].comment, "Still great, thank you");

    feed.shutdown().await;
}

#[tokio::test]
async fn other_users_feedback_stays_invisible() {
    let store = Arc::new(MemoryStore::new());
    let provider = MemoryIdentityProvider::new();
    provider.register("a@x.com", "secret1", None);
    provider.register("b@x.com", "secret2", None);

    let submitter = FeedbackSubmitter::new(store.clone(), "feedbacks");
    let other = provider.sign_in("b@x.com", "secret2").await.unwrap();
    submitter
        .submit(&other, 1, "someone else's complaint")
        .await
        .unwrap();
    provider.sign_out().await;

    let (feed, mut views) = FeedbackFeed::start(store.clone(), provider.sessions(), "feedbacks");
    let session = provider.sign_in("a@x.com", "secret1").await.unwrap();
    submitter
        .submit(&session, 5, "my own happy feedback")
        .await
        .unwrap();

    let view = wait_for_view(&mut views, |v| v.stats.total == 1).await;
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].user_id, session.uid);

    feed.shutdown().await;
}

#[tokio::test]
async fn sign_out_empties_the_view_and_releases_the_subscription() {
    let store = Arc::new(MemoryStore::new());
    let provider = MemoryIdentityProvider::new();
    provider.register("a@x.com", "secret1", None);

    let (feed, mut views) = FeedbackFeed::start(store.clone(), provider.sessions(), "feedbacks");

    let session = provider.sign_in("a@x.com", "secret1").await.unwrap();
    let submitter = FeedbackSubmitter::new(store.clone(), "feedbacks");
    submitter
        .submit(&session, 3, "an average experience")
        .await
        .unwrap();
    wait_for_view(&mut views, |v| v.stats.total == 1).await;
    assert_eq!(store.stats().active_subscriptions, 1);

    provider.sign_out().await;
    wait_for_view(&mut views, |v| v.stats.total == 0).await;
    wait_until(|| store.stats().active_subscriptions == 0).await;

    feed.shutdown().await;
}

#[tokio::test]
async fn subscription_loss_falls_back_to_the_empty_view() {
    let store = Arc::new(MemoryStore::new());
    let provider = MemoryIdentityProvider::new();
    provider.register("a@x.com", "secret1", None);

    let (feed, mut views) = FeedbackFeed::start(store.clone(), provider.sessions(), "feedbacks");
    let session = provider.sign_in("a@x.com", "secret1").await.unwrap();

    let submitter = FeedbackSubmitter::new(store.clone(), "feedbacks");
    submitter
        .submit(&session, 2, "a comment long enough")
        .await
        .unwrap();
    wait_for_view(&mut views, |v| v.stats.total == 1).await;

    store.drop_collection("feedbacks");
    let view = wait_for_view(&mut views, |v| v.stats.total == 0).await;
    assert_eq!(view, FeedbackView::empty());

    feed.shutdown().await;
}

#[tokio::test]
async fn feed_shutdown_releases_the_subscription() {
    let store = Arc::new(MemoryStore::new());
    let provider = MemoryIdentityProvider::new();
    provider.register("a@x.com", "secret1", None);

    let (feed, views) = FeedbackFeed::start(store.clone(), provider.sessions(), "feedbacks");
    provider.sign_in("a@x.com", "secret1").await.unwrap();
    wait_until(|| store.stats().active_subscriptions == 1).await;
    drop(views);

    feed.shutdown().await;
    wait_until(|| store.stats().active_subscriptions == 0).await;
}

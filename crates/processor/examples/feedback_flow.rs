//! Demonstration of the full feedback pipeline
//!
//! This example wires the in-memory identity provider and store to the
//! submitter and the live feed: sign in, submit a few ratings, watch the
//! derived view update, then sign out and shut down.

use std::sync::Arc;

use auth::{validate_credentials, IdentityProvider, MemoryIdentityProvider};
use collector::{validate, FeedbackSubmitter};
use opina_config::OpinaConfig;
use processor::FeedbackFeed;
use store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = OpinaConfig::load(None)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.observability.log_level)
            }),
        )
        .init();

    let store = Arc::new(MemoryStore::new());
    let provider = MemoryIdentityProvider::new();
    provider.register("john.doe@example.com", "hunter22", None);

    let (feed, mut views) = FeedbackFeed::start(
        store.clone(),
        provider.sessions(),
        config.store.collection_path.clone(),
    );

    let (email, password) = ("john.doe@example.com", "hunter22");
    let violations = validate_credentials(email, password);
    assert!(violations.is_empty(), "credentials rejected: {violations:?}");
    let session = provider.sign_in(email, password).await?;
    println!("signed in as uid={}", session.uid);

    let submitter = FeedbackSubmitter::new(store.clone(), config.store.collection_path.clone());
    for (rating, comment) in [
        (5, "Excellent care, very attentive staff"),
        (4, "Great service overall"),
        (4, "Quick and friendly, would come back"),
    ] {
        let report = validate(rating, comment);
        if !report.ok() {
            eprintln!("rejected: {:?}", report.violations());
            continue;
        }
        let id = submitter.submit(&session, rating, comment).await?;
        println!("submitted feedback {id}");

        views.changed().await?;
        let view = views.borrow_and_update().clone();
        println!(
            "view: {} records, average {:.1}, distribution {:?}",
            view.stats.total, view.stats.average, view.stats.distribution
        );
    }

    let latest = views.borrow().clone();
    println!("\nnewest first:");
    for record in &latest.records {
        println!(
            "  [{}] {} — {}",
            record.rating, record.user_name, record.comment
        );
    }

    provider.sign_out().await;
    views.changed().await?;
    println!(
        "\nsigned out, view now has {} records",
        views.borrow().stats.total
    );

    feed.shutdown().await;
    Ok(())
}

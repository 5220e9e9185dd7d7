//! Integration tests for the feedback submitter
//!
//! These verify the submitted document shape against the in-memory store and
//! the failure path against a store double that always refuses appends.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use collector::{validate, FeedbackSubmitter, SubmitError};
use opina_types::Session;
use store::{
    DocumentId, DocumentStore, Filter, MemoryStore, StoreError, StoreResult, Subscription,
};

#[tokio::test]
async fn submit_writes_exactly_one_document_with_resolved_name() {
    let store = Arc::new(MemoryStore::new());
    let submitter = FeedbackSubmitter::new(store.clone(), "feedbacks");
    let session = Session::new("u1", "john.doe@x.com");

    let rating = 4;
    let comment = "Great service overall";
    assert!(validate(rating, comment).ok());

    let id = submitter.submit(&session, rating, comment).await.unwrap();

    assert_eq!(store.len("feedbacks"), 1);
    let mut sub = store
        .subscribe("feedbacks", Filter::field_equals("userId", "u1"))
        .await
        .unwrap();
    let docs = sub.snapshot();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, id);
    assert_eq!(
        docs[0].fields,
        json!({
            "userId": "u1",
            "userName": "John Doe",
            "rating": 4,
            "comment": "Great service overall",
        })
    );
}

#[tokio::test]
async fn profile_display_name_is_stored_verbatim() {
    let store = Arc::new(MemoryStore::new());
    let submitter = FeedbackSubmitter::new(store.clone(), "feedbacks");
    let session = Session::new("u2", "jsmith123@x.com").with_display_name("J. Smith");

    submitter
        .submit(&session, 5, "Absolutely wonderful")
        .await
        .unwrap();

    let mut sub = store
        .subscribe("feedbacks", Filter::field_equals("userId", "u2"))
        .await
        .unwrap();
    assert_eq!(sub.snapshot()[0].fields["userName"], json!("J. Smith"));
}

#[tokio::test]
async fn concurrent_submissions_are_independent_appends() {
    let store = Arc::new(MemoryStore::new());
    let submitter = Arc::new(FeedbackSubmitter::new(store.clone(), "feedbacks"));

    let mut handles = Vec::new();
    for i in 0..8 {
        let submitter = submitter.clone();
        handles.push(tokio::spawn(async move {
            let session = Session::new(format!("u{i}"), format!("user{i}@x.com"));
            submitter.submit(&session, 3, "a comment long enough").await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8, "every submission must get a unique id");
    assert_eq!(store.len("feedbacks"), 8);
}

struct RefusingStore;

#[async_trait]
impl DocumentStore for RefusingStore {
    async fn append(&self, path: &str, _fields: Value) -> StoreResult<DocumentId> {
        Err(StoreError::PermissionDenied(path.to_string()))
    }

    async fn subscribe(&self, path: &str, _filter: Filter) -> StoreResult<Subscription> {
        Err(StoreError::PermissionDenied(path.to_string()))
    }
}

#[tokio::test]
async fn store_failure_surfaces_as_submit_error() {
    let submitter = FeedbackSubmitter::new(Arc::new(RefusingStore), "feedbacks");
    let session = Session::new("u1", "a@b.com");

    let err = submitter
        .submit(&session, 2, "a comment long enough")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Store(StoreError::PermissionDenied(_))
    ));
}

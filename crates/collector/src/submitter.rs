//! Feedback submitter
//!
//! Builds a feedback document from an authenticated session and validated
//! input, and appends it to the store. Exactly one append per successful
//! call; failures surface once and are never retried here, so a retry after
//! a failure of unknown outcome may create a duplicate record.

use std::sync::Arc;

use tracing::{error, info};

use opina_types::{NewFeedback, Session};
use store::{DocumentId, DocumentStore, StoreError};

use crate::names::derive_display_name;

/// Submit error types.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The store rejected or could not complete the append.
    #[error("store rejected the append: {0}")]
    Store(#[from] StoreError),

    /// The feedback fields could not be encoded as a document body.
    #[error("could not encode feedback: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Appends validated feedback to one collection of a document store.
pub struct FeedbackSubmitter {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl FeedbackSubmitter {
    /// Create a submitter writing to `collection`.
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Submit one feedback record for `session`.
    ///
    /// Callers must have already obtained a passing
    /// [`ValidationReport`](crate::ValidationReport); this does not
    /// re-validate. The user name is the session's display name when present
    /// and non-empty, else derived from the email address. The store assigns
    /// id and `createdAt`.
    pub async fn submit(
        &self,
        session: &Session,
        rating: u8,
        comment: &str,
    ) -> Result<DocumentId, SubmitError> {
        let fields = NewFeedback {
            user_id: session.uid.clone(),
            user_name: resolve_user_name(session),
            rating,
            comment: comment.to_string(),
        };
        let body = serde_json::to_value(&fields)?;

        match self.store.append(&self.collection, body).await {
            Ok(id) => {
                info!(
                    collection = %self.collection,
                    id = %id,
                    user = %session.uid,
                    rating,
                    "feedback submitted"
                );
                Ok(id)
            }
            Err(e) => {
                error!(
                    collection = %self.collection,
                    user = %session.uid,
                    error = %e,
                    "feedback submission failed"
                );
                Err(e.into())
            }
        }
    }
}

fn resolve_user_name(session: &Session) -> String {
    match session.display_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => derive_display_name(&session.email),
    }
}

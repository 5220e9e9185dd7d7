//! Feedback records and derived statistics
//!
//! A [`FeedbackRecord`] is created once on submit, read on every snapshot for
//! the owning user, and never updated or deleted. [`FeedbackStats`] is
//! recomputed from scratch on every snapshot and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest valid rating.
pub const MIN_RATING: u8 = 1;

/// Highest valid rating.
pub const MAX_RATING: u8 = 5;

/// Fields of a feedback submission before the store has accepted it.
///
/// The store assigns `id` and `createdAt` on append; everything else is fixed
/// by the submitter at creation time. This is also the wire shape of the
/// document body stored under the `feedbacks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    /// Owning user's identifier, taken from the authenticated session.
    pub user_id: String,
    /// Display label resolved at creation time (profile name, else derived
    /// from the email address).
    pub user_name: String,
    /// Integer rating in `[1, 5]`.
    pub rating: u8,
    /// Free-form comment, 10 to 500 characters.
    pub comment: String,
}

/// One persisted feedback submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Store-assigned unique identifier, never reused.
    pub id: String,
    /// Owning user's identifier; never mutated.
    pub user_id: String,
    /// Display label resolved at creation time; never mutated.
    pub user_name: String,
    /// Integer rating in `[1, 5]`.
    pub rating: u8,
    /// Free-form comment, 10 to 500 characters.
    pub comment: String,
    /// Server-assigned timestamp at write time. Non-decreasing across
    /// records from the same writer session, not globally monotonic.
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Combine the store-assigned envelope with the submitted fields.
    pub fn from_parts(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        fields: NewFeedback,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: fields.user_id,
            user_name: fields.user_name,
            rating: fields.rating,
            comment: fields.comment,
            created_at,
        }
    }
}

/// Aggregate statistics over one snapshot of a user's feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    /// Number of records in the current view.
    pub total: u64,
    /// Arithmetic mean of `rating`; `0.0` when `total == 0`.
    pub average: f64,
    /// Rating value 1..=5 to count of records with that rating. Empty when
    /// there are no records, otherwise all five buckets are present with
    /// explicit zeros.
    pub distribution: BTreeMap<u8, u64>,
}

impl FeedbackStats {
    /// The statistics of an empty view.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any records contributed to these statistics.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

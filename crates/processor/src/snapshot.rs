//! Snapshot decoding, ordering and statistics
//!
//! Turns one store snapshot into the derived view: records sorted newest
//! first plus recomputed [`FeedbackStats`]. Recomputation is O(n) per
//! snapshot over the full list; per-user feedback volume is small and no
//! incremental maintenance is attempted.

use tracing::warn;

use opina_types::{FeedbackRecord, FeedbackStats, NewFeedback};
use store::Document;

use crate::aggregation::{Aggregator, AverageAggregator, DistributionAggregator};

/// The derived, render-ready state of one user's feedback.
///
/// Has no identity or persistence of its own; its lifetime is one render
/// cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackView {
    /// Records sorted by `createdAt` descending. Relative order of equal
    /// timestamps is unspecified.
    pub records: Vec<FeedbackRecord>,
    /// Statistics over `records`.
    pub stats: FeedbackStats,
}

impl FeedbackView {
    /// The view shown when there is no data or no authenticated user.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Decode one stored document into a [`FeedbackRecord`].
pub fn decode_document(doc: &Document) -> Result<FeedbackRecord, serde_json::Error> {
    let fields: NewFeedback = serde_json::from_value(doc.fields.clone())?;
    Ok(FeedbackRecord::from_parts(
        doc.id.clone(),
        doc.created_at,
        fields,
    ))
}

/// Aggregate one snapshot into the derived view.
///
/// Documents that fail to decode, and records whose rating falls outside
/// the valid scale, are skipped with a warning rather than failing the
/// whole snapshot. An empty snapshot yields [`FeedbackView::empty`], whose
/// stats carry an empty distribution map.
pub fn aggregate(docs: &[Document]) -> FeedbackView {
    let mut average = AverageAggregator::new();
    let mut distribution = DistributionAggregator::new();
    let mut records = Vec::with_capacity(docs.len());

    for doc in docs {
        let record = match decode_document(doc) {
            Ok(record) => record,
            Err(e) => {
                warn!(id = %doc.id, error = %e, "skipping undecodable feedback document");
                continue;
            }
        };
        if let Err(e) = average
            .update(record.rating)
            .and_then(|_| distribution.update(record.rating))
        {
            warn!(id = %record.id, error = %e, "skipping feedback record");
            continue;
        }
        records.push(record);
    }

    if records.is_empty() {
        return FeedbackView::empty();
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    FeedbackView {
        stats: FeedbackStats {
            total: average.count(),
            average: average.finalize(),
            distribution: distribution.finalize(),
        },
        records,
    }
}

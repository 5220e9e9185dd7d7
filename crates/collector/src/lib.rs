//! Feedback validation and submission
//!
//! This crate owns the write side of the opina pipeline: pure input
//! validation, the display-name fallback derived from an email address, and
//! the submitter that appends validated feedback to the store.

pub mod names;
pub mod submitter;
pub mod validation;

pub use names::derive_display_name;
pub use submitter::{FeedbackSubmitter, SubmitError};
pub use validation::{
    validate, ValidationReport, Violation, MAX_COMMENT_CHARS, MIN_COMMENT_CHARS, UNSELECTED_RATING,
};

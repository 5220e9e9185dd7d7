//! Feedback input validation
//!
//! Pure, total checks run before submission. Validation state is a function
//! of the current input, recomputed on demand; nothing here blocks, fails,
//! or touches the store.

/// Sentinel rating meaning "nothing selected yet".
pub const UNSELECTED_RATING: u8 = 0;

/// Minimum comment length in characters.
pub const MIN_COMMENT_CHARS: usize = 10;

/// Maximum comment length in characters. Enforced where input is
/// constructed (the original caps it in the form widget), not by
/// [`validate`].
pub const MAX_COMMENT_CHARS: usize = 500;

/// A reason the submission is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Violation {
    /// Rating is still the unselected sentinel.
    MissingRating,
    /// Comment is shorter than [`MIN_COMMENT_CHARS`].
    CommentTooShort,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::MissingRating => write!(f, "a rating must be selected"),
            Violation::CommentTooShort => {
                write!(f, "the comment must be at least {MIN_COMMENT_CHARS} characters")
            }
        }
    }
}

/// Outcome of validating one (rating, comment) input pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// True iff no violation fired.
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Every violation that fired, in declaration order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether a specific violation fired.
    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }
}

/// Validate a feedback submission.
///
/// The rules are evaluated independently and both may fire together.
/// Comment length is counted untrimmed: surrounding whitespace counts
/// toward the minimum, so a comment of ten spaces passes.
pub fn validate(rating: u8, comment: &str) -> ValidationReport {
    let mut violations = Vec::new();

    if rating == UNSELECTED_RATING {
        violations.push(Violation::MissingRating);
    }
    if comment.chars().count() < MIN_COMMENT_CHARS {
        violations.push(Violation::CommentTooShort);
    }

    ValidationReport { violations }
}

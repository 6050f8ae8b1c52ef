use thiserror::Error;

/// Rejection raised by the final-score transform before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The total score must be {expected}, but it is {actual}.")]
    ScoreSumMismatch { actual: i128, expected: i64 },
}

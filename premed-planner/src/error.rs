use thiserror::Error;

/// Errors raised when a UI control value cannot be turned into a domain value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown priority '{0}'")]
    UnknownPriority(String),
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Unknown completion status '{0}'")]
    UnknownStatus(String),
    #[error("Unknown feedback type '{0}'")]
    UnknownFeedbackKind(String),
    #[error("Unknown mood '{0}'")]
    UnknownMood(String),
    #[error("Unknown rating '{0}'")]
    UnknownRating(String),
}

/// Errors reported by caller-side validation of form input.
///
/// Stores never produce these: validating is the caller's job, and a store
/// accepts whatever it is handed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Name must not be empty")]
    EmptyName,
}

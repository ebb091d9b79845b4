use thiserror::Error;

/// Failure reported by a suggestion source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("suggestion source failed: {0}")]
    Source(String),
    #[error("lookup worker is gone")]
    Disconnected,
}

/// Widget construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("widget id is required")]
    MissingId,
    #[error("a suggestion source is required")]
    MissingSource,
    #[error("external watch poll interval must be positive")]
    InvalidPollInterval,
}

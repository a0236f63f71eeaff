use thiserror::Error;

/// Errors emitted while synthesizing or delivering a batch.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid count: {0} (must be >= 0)")]
    InvalidCount(i64),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("sampling error: {0}")]
    Sampling(String),
    /// Store failures and missing prerequisites, whether the store could not
    /// be read or held nothing to reference.
    #[error(transparent)]
    Core(#[from] madang_core::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GenerationError {
    pub(crate) fn prerequisite_unavailable(message: impl Into<String>) -> Self {
        Self::Core(madang_core::Error::PrerequisiteUnavailable(message.into()))
    }
}

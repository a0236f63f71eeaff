use thiserror::Error;

/// Core error type shared across the Madang crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Books or customers could not be loaded, or none exist to reference.
    #[error("prerequisites unavailable: {0}")]
    PrerequisiteUnavailable(String),
    /// The store could not be reached.
    #[error("sink connectivity error: {0}")]
    SinkConnectivity(String),
    /// A batch write or update was rejected by the store.
    #[error("write failed: {0}")]
    WriteFailed(String),
    /// A read that is not part of prerequisite loading failed.
    #[error("database error: {0}")]
    Db(String),
    /// Configuration values are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A requested feature is not supported by this adapter.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience alias for results returned by the Madang crates.
pub type Result<T> = std::result::Result<T, Error>;

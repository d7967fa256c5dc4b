use thiserror::Error;

/// Errors produced by the store layer.
///
/// Business-rule failures (unknown id, non-author delete) are reported via
/// boolean returns, never through this enum; `StoreError` is reserved for
/// genuinely unexpected conditions in the durable backing.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the snapshot directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted snapshot could not be serialized or parsed back into the
    /// expected shape.  Deliberately loud: corrupt durable state must be
    /// observable, not silently replaced with defaults.
    #[error("Snapshot (de)serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

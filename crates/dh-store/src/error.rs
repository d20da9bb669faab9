/// Errors from directory store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("cannot connect to {location}: {reason}")]
    Connection { location: String, reason: String },

    /// A read or write call failed.
    #[error("{op} failed: {reason}")]
    Query { op: &'static str, reason: String },

    /// `insert` was called for a program that is already stored.
    #[error("program already stored: {0}")]
    DuplicateProgram(String),

    /// `update` was called for a program that is not stored.
    #[error("program not stored: {0}")]
    ProgramNotFound(String),

    /// Stored data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for failures that happen before any data is touched.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

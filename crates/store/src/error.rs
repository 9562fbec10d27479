/// Error type for storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend could not serve the request.
    #[error("storage backend error: {message}")]
    Backend { message: String },

    /// A seed document could not be read.
    #[error("failed to read seed `{origin}`: {message}")]
    SeedIo { origin: String, message: String },

    /// A seed document is structurally invalid.
    #[error("invalid seed `{origin}`: {message}")]
    SeedFormat { origin: String, message: String },
}

impl StoreError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Backend { .. } => "STORE_BACKEND",
            Self::SeedIo { .. } => "STORE_SEED_IO",
            Self::SeedFormat { .. } => "STORE_SEED_FORMAT",
        }
    }
}

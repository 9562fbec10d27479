/// Error type for scope parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// The scope prefix is not `default`, `websites`, or `stores`.
    #[error("unknown scope prefix in `{input}`")]
    UnknownPrefix { input: String },

    /// A website or store scope is missing its numeric id.
    #[error("missing scope id in `{input}`")]
    MissingId { input: String },

    /// The scope id is present but not a valid number.
    #[error("invalid scope id in `{input}`: {reason}")]
    InvalidId { input: String, reason: String },

    /// The default scope was given an id.
    #[error("the default scope carries no id: `{input}`")]
    UnexpectedId { input: String },
}

impl ScopeError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownPrefix { .. } => "SCOPE_UNKNOWN_PREFIX",
            Self::MissingId { .. } => "SCOPE_MISSING_ID",
            Self::InvalidId { .. } => "SCOPE_INVALID_ID",
            Self::UnexpectedId { .. } => "SCOPE_UNEXPECTED_ID",
        }
    }
}

/// Error type for schema operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A route string does not have the `section/group/field` shape.
    #[error("invalid route `{route}`: {reason}")]
    InvalidRoute { route: String, reason: String },

    /// No field exists at the given route.
    #[error("unknown route: `{route}`")]
    UnknownRoute { route: String },

    /// Structural validation found one or more problems.
    #[error("schema validation failed: {}", problems.join("; "))]
    Validation { problems: Vec<String> },
}

impl SchemaError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidRoute { .. } => "SCHEMA_INVALID_ROUTE",
            Self::UnknownRoute { .. } => "SCHEMA_UNKNOWN_ROUTE",
            Self::Validation { .. } => "SCHEMA_VALIDATION",
        }
    }
}

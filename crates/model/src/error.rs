use vitrine_schema::SchemaError;
use vitrine_scope::{Scope, ScopePerm};
use vitrine_store::StoreError;

/// Error type for typed access and resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// The schema has no field at the route.
    #[error("no field declared at `{route}`")]
    UnknownRoute { route: String },

    /// The field exists but its kind does not fit the accessor.
    #[error("`{route}` is a {actual} field, not usable as {expected}")]
    KindMismatch {
        route: String,
        expected: String,
        actual: String,
    },

    /// A write was attempted below the field's permitted scope depth.
    #[error("`{route}` is not writable at {scope}; deepest allowed is {max:?}")]
    ScopeNotAllowed {
        route: String,
        scope: Scope,
        max: ScopePerm,
    },

    /// The value failed the field's declarative validation.
    #[error("invalid value for `{route}`: {reason}")]
    InvalidValue { route: String, reason: String },

    /// The value is not among the field's options.
    #[error("`{value}` is not an option of `{route}`")]
    NotInOptions { route: String, value: String },

    /// A field references an option model that is not registered.
    #[error("option model `{key}` referenced by `{route}` is not registered")]
    UnknownOptionModel { route: String, key: String },

    /// A stored raw value could not be decoded.
    #[error("cannot decode `{route}` at {scope}: {reason}")]
    Decode {
        route: String,
        scope: Scope,
        reason: String,
    },

    /// The schema itself is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ModelError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownRoute { .. } => "MODEL_UNKNOWN_ROUTE",
            Self::KindMismatch { .. } => "MODEL_KIND_MISMATCH",
            Self::ScopeNotAllowed { .. } => "MODEL_SCOPE_NOT_ALLOWED",
            Self::InvalidValue { .. } => "MODEL_INVALID_VALUE",
            Self::NotInOptions { .. } => "MODEL_NOT_IN_OPTIONS",
            Self::UnknownOptionModel { .. } => "MODEL_UNKNOWN_OPTION_MODEL",
            Self::Decode { .. } => "MODEL_DECODE",
            Self::Schema(e) => e.code(),
            Self::Store(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_scope::WebsiteId;

    #[test]
    fn display_messages() {
        let err = ModelError::UnknownRoute {
            route: "web/secure/nope".into(),
        };
        assert_eq!(err.to_string(), "no field declared at `web/secure/nope`");

        let err = ModelError::ScopeNotAllowed {
            route: "general/locale/timezone".into(),
            scope: Scope::Website(WebsiteId(2)),
            max: ScopePerm::Default,
        };
        assert!(err.to_string().contains("not writable at websites/2"));

        let err = ModelError::NotInOptions {
            route: "catalog/frontend/sort_by".into(),
            value: "sideways".into(),
        };
        assert_eq!(
            err.to_string(),
            "`sideways` is not an option of `catalog/frontend/sort_by`"
        );
    }

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err: ModelError = SchemaError::UnknownRoute {
            route: "a/b/c".into(),
        }
        .into();
        assert_eq!(err.code(), "SCHEMA_UNKNOWN_ROUTE");

        let err: ModelError = StoreError::Backend {
            message: String::new(),
        }
        .into();
        assert_eq!(err.code(), "STORE_BACKEND");
    }

    #[test]
    fn codes_are_prefixed() {
        let err = ModelError::Decode {
            route: String::new(),
            scope: Scope::Default,
            reason: String::new(),
        };
        assert!(err.code().starts_with("MODEL_"));
    }
}

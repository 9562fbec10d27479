use serde::{Deserialize, Serialize};

/// How a field's logical value maps to the raw string kept in storage.
///
/// The encode/decode implementations live in `vitrine-model`; the schema
/// only records which model a field uses so tables stay pure data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Stored verbatim.
    #[default]
    Plain,
    /// Base64-masked at rest; for secrets.
    Obscured,
    /// A comma-separated list.
    Csv,
    /// An opaque JSON document.
    Serialized,
}

impl BackendKind {
    /// Whether raw storage bytes differ from the logical value.
    #[must_use]
    pub fn transforms_at_rest(&self) -> bool {
        matches!(self, Self::Obscured)
    }

    /// Whether the logical value is a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Csv)
    }
}

use serde::{Deserialize, Serialize};

use crate::backend::BackendKind;

/// The kind of a configuration field, determining its admin widget and
/// value semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    /// A secret rendered masked and stored obscured.
    Obscure,
    Bool,
    Int,
    Float,
    /// A monetary amount in the base currency.
    Price,
    Select,
    Multiselect,
    /// A time of day, `HH,MM,SS` wire form.
    Time,
    /// A duration in seconds.
    Duration,
}

impl FieldKind {
    /// Whether this kind presents a fixed set of choices.
    #[must_use]
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Multiselect)
    }

    /// Whether values of this kind parse as numbers.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Price | Self::Duration)
    }

    /// Whether values of this kind must be masked in UI and logs.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Obscure)
    }

    /// Whether this kind holds several values at once.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multiselect)
    }

    /// The backend model a field of this kind uses unless overridden.
    #[must_use]
    pub fn default_backend(&self) -> BackendKind {
        match self {
            Self::Obscure => BackendKind::Obscured,
            Self::Multiselect => BackendKind::Csv,
            _ => BackendKind::Plain,
        }
    }
}

use serde::{Deserialize, Serialize};

/// A single choice in a select or multiselect field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// The raw value stored when this option is chosen.
    pub value: String,

    /// Human-readable display label.
    pub label: String,

    /// Whether this option is shown but not selectable.
    #[serde(default)]
    pub disabled: bool,
}

impl FieldOption {
    /// Create a new enabled option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

/// Where a selection field gets its choices from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum OptionsSource {
    /// Choices written inline in the schema table.
    Inline { options: Vec<FieldOption> },

    /// Choices provided at runtime by a named option model.
    Model { key: String },
}

impl OptionsSource {
    /// Inline options from `(value, label)` pairs.
    #[must_use]
    pub fn inline<V, L>(pairs: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self::Inline {
            options: pairs
                .into_iter()
                .map(|(value, label)| FieldOption::new(value, label))
                .collect(),
        }
    }

    /// A reference to a named runtime option model.
    #[must_use]
    pub fn model(key: impl Into<String>) -> Self {
        Self::Model { key: key.into() }
    }

    /// The inline options, when present.
    #[must_use]
    pub fn as_inline(&self) -> Option<&[FieldOption]> {
        match self {
            Self::Inline { options } => Some(options),
            Self::Model { .. } => None,
        }
    }
}

/// The conventional yes/no pair used by boolean select fields.
#[must_use]
pub fn yes_no() -> OptionsSource {
    OptionsSource::inline([("1", "Yes"), ("0", "No")])
}

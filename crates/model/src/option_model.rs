use std::collections::HashMap;
use std::sync::Arc;

use vitrine_schema::option::FieldOption;

/// A runtime provider of select options, for choices a schema table
/// cannot enumerate inline.
pub trait OptionModel: Send + Sync {
    /// The options this model currently offers.
    fn options(&self) -> Vec<FieldOption>;
}

/// An option model over a fixed list.
#[derive(Debug, Clone)]
pub struct StaticOptions {
    options: Vec<FieldOption>,
}

impl StaticOptions {
    /// Build from `(value, label)` pairs.
    #[must_use]
    pub fn new<V, L>(pairs: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        Self {
            options: pairs
                .into_iter()
                .map(|(value, label)| FieldOption::new(value, label))
                .collect(),
        }
    }
}

impl OptionModel for StaticOptions {
    fn options(&self) -> Vec<FieldOption> {
        self.options.clone()
    }
}

/// Named option models, looked up by the key a field's
/// `OptionsSource::Model` carries.
#[derive(Clone, Default)]
pub struct OptionModelRegistry {
    models: HashMap<String, Arc<dyn OptionModel>>,
}

impl OptionModelRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under a key, replacing any previous one.
    pub fn register(&mut self, key: impl Into<String>, model: Arc<dyn OptionModel>) {
        self.models.insert(key.into(), model);
    }

    /// Register a model (builder-style, consuming).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, model: Arc<dyn OptionModel>) -> Self {
        self.models.insert(key.into(), model);
        self
    }

    /// The options offered by the named model, if registered.
    #[must_use]
    pub fn options_for(&self, key: &str) -> Option<Vec<FieldOption>> {
        self.models.get(key).map(|model| model.options())
    }

    /// Whether a model is registered under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    /// The registered model keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for OptionModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("OptionModelRegistry")
            .field("models", &keys)
            .finish()
    }
}

use std::sync::Arc;

use dashmap::DashMap;
use vitrine_schema::element::Field;
use vitrine_schema::option::FieldOption;
use vitrine_schema::{BackendKind, Route, Sections};
use vitrine_scope::{Scope, StoreWebsiteMap};
use vitrine_store::{ConfigStorage, MemoryStorage};

use crate::backend;
use crate::error::ModelError;
use crate::option_model::OptionModelRegistry;
use crate::path::ScopedPath;
use crate::ModelResult;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    /// A stored override at this scope in the fallback chain.
    Scope(Scope),
    /// The field's schema default; nothing was stored anywhere.
    SchemaDefault,
}

/// A resolved configuration value and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The logical wire value, already backend-decoded.
    pub value: String,
    /// The scope the value was found at.
    pub origin: ValueOrigin,
}

/// The resolution engine: schema, storage, topology, and a read-through
/// cache behind one handle.
///
/// Reads walk the scope fallback chain (store → website → default →
/// schema default); writes enforce scope permissions, declarative
/// validation, and option membership before encoding to storage.
#[derive(Clone)]
pub struct ConfigService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    storage: Arc<dyn ConfigStorage>,
    sections: Sections,
    websites: StoreWebsiteMap,
    options: OptionModelRegistry,
    /// Raw storage rows keyed by storage key; `None` caches absence.
    cache: DashMap<String, Option<String>>,
}

impl ConfigService {
    /// Start building a service.
    #[must_use]
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::default()
    }

    /// The merged schema this service resolves against.
    #[must_use]
    pub fn sections(&self) -> &Sections {
        &self.inner.sections
    }

    /// The registered option models.
    #[must_use]
    pub fn option_registry(&self) -> &OptionModelRegistry {
        &self.inner.options
    }

    /// The store-to-website topology used for fallback.
    #[must_use]
    pub fn websites(&self) -> &StoreWebsiteMap {
        &self.inner.websites
    }

    /// The field declared at `route`.
    pub fn field(&self, route: &Route) -> ModelResult<&Field> {
        self.inner
            .sections
            .find_field(route)
            .ok_or_else(|| ModelError::UnknownRoute {
                route: route.to_string(),
            })
    }

    /// Resolve a value through the fallback chain.
    ///
    /// The first stored override wins, walking `scope` up to `Default`;
    /// with nothing stored, the schema default applies. `None` means the
    /// field has no value at all.
    pub async fn value(&self, route: &Route, scope: Scope) -> ModelResult<Option<Resolved>> {
        let field = self.field(route)?;

        for candidate in scope.fallback_chain(&self.inner.websites) {
            let key = ScopedPath::new(route.clone(), candidate).storage_key();
            // The read guard must drop before the insert below touches the
            // same shard.
            let cached = self.inner.cache.get(&key).map(|entry| entry.value().clone());
            let raw = match cached {
                Some(cached) => cached,
                None => {
                    let loaded = self.inner.storage.get(&key).await?;
                    self.inner.cache.insert(key.clone(), loaded.clone());
                    loaded
                }
            };

            if let Some(raw) = raw {
                let value = backend::decode(field.backend, &raw).map_err(|reason| {
                    ModelError::Decode {
                        route: route.to_string(),
                        scope: candidate,
                        reason,
                    }
                })?;
                tracing::trace!(%route, scope = %candidate, "resolved from storage");
                return Ok(Some(Resolved {
                    value,
                    origin: ValueOrigin::Scope(candidate),
                }));
            }
        }

        Ok(field.default.as_ref().map(|default| Resolved {
            value: default_to_raw(default),
            origin: ValueOrigin::SchemaDefault,
        }))
    }

    /// Write a validated override at `scope`.
    ///
    /// The logical value is checked against the field's scope permission,
    /// declarative rules, and option membership, then backend-encoded.
    pub async fn set(&self, route: &Route, scope: Scope, logical: &str) -> ModelResult<()> {
        let field = self.field(route)?;

        if !field.scope.allows(scope) {
            return Err(ModelError::ScopeNotAllowed {
                route: route.to_string(),
                scope,
                max: field.scope,
            });
        }

        if field.required && logical.is_empty() {
            return Err(ModelError::InvalidValue {
                route: route.to_string(),
                reason: "a required field cannot be empty".to_owned(),
            });
        }

        for rule in &field.validation {
            rule.check(logical).map_err(|reason| ModelError::InvalidValue {
                route: route.to_string(),
                reason,
            })?;
        }

        self.check_options(route, field, logical)?;

        let raw = backend::encode(field.backend, logical);
        let key = ScopedPath::new(route.clone(), scope).storage_key();
        self.inner.storage.set(&key, raw).await?;
        self.invalidate(route);

        if field.kind.is_sensitive() {
            tracing::debug!(%route, %scope, "set [REDACTED]");
        } else {
            tracing::debug!(%route, %scope, value = logical, "set");
        }
        Ok(())
    }

    /// Remove an override at `scope`; returns whether one existed.
    pub async fn delete(&self, route: &Route, scope: Scope) -> ModelResult<bool> {
        let field = self.field(route)?;
        if !field.scope.allows(scope) {
            return Err(ModelError::ScopeNotAllowed {
                route: route.to_string(),
                scope,
                max: field.scope,
            });
        }

        let key = ScopedPath::new(route.clone(), scope).storage_key();
        let existed = self.inner.storage.delete(&key).await?;
        self.invalidate(route);
        tracing::debug!(%route, %scope, existed, "deleted override");
        Ok(existed)
    }

    /// Membership check against the field's option source, element-wise
    /// for list-valued fields. Disabled options are not selectable.
    fn check_options(&self, route: &Route, field: &Field, logical: &str) -> ModelResult<()> {
        let Some(source) = &field.options else {
            return Ok(());
        };

        let options: Vec<FieldOption> = match source {
            vitrine_schema::option::OptionsSource::Inline { options } => options.clone(),
            vitrine_schema::option::OptionsSource::Model { key } => self
                .inner
                .options
                .options_for(key)
                .ok_or_else(|| ModelError::UnknownOptionModel {
                    route: route.to_string(),
                    key: key.clone(),
                })?,
        };

        let is_member = |candidate: &str| {
            options
                .iter()
                .any(|opt| !opt.disabled && opt.value == candidate)
        };

        if field.kind.is_multi() || field.backend == BackendKind::Csv {
            for element in backend::split_csv(logical) {
                if !is_member(&element) {
                    return Err(ModelError::NotInOptions {
                        route: route.to_string(),
                        value: element,
                    });
                }
            }
            Ok(())
        } else if logical.is_empty() && !field.required {
            // Clearing an optional select is allowed.
            Ok(())
        } else if is_member(logical) {
            Ok(())
        } else {
            Err(ModelError::NotInOptions {
                route: route.to_string(),
                value: logical.to_owned(),
            })
        }
    }

    /// Drop every cached row of `route`, at every scope.
    fn invalidate(&self, route: &Route) {
        let suffix = format!("/{route}");
        self.inner.cache.retain(|key, _| !key.ends_with(&suffix));
    }
}

/// The raw wire form of a schema default value.
fn default_to_raw(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(true) => "1".to_owned(),
        serde_json::Value::Bool(false) => "0".to_owned(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

impl std::fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigService")
            .field("sections", &self.inner.sections.len())
            .field("fields", &self.inner.sections.total_fields())
            .field("stores", &self.inner.websites.len())
            .field("cached", &self.inner.cache.len())
            .finish()
    }
}

/// Builds a [`ConfigService`], validating and sorting the schema.
#[derive(Default)]
pub struct ConfigServiceBuilder {
    storage: Option<Arc<dyn ConfigStorage>>,
    sections: Sections,
    websites: StoreWebsiteMap,
    options: OptionModelRegistry,
}

impl ConfigServiceBuilder {
    /// Use the given storage backend; defaults to in-memory.
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn ConfigStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Merge a schema table into the service's schema.
    #[must_use]
    pub fn sections(mut self, sections: Sections) -> Self {
        self.sections.merge(sections);
        self
    }

    /// Set the store-to-website topology.
    #[must_use]
    pub fn websites(mut self, websites: StoreWebsiteMap) -> Self {
        self.websites = websites;
        self
    }

    /// Set the option model registry.
    #[must_use]
    pub fn options(mut self, options: OptionModelRegistry) -> Self {
        self.options = options;
        self
    }

    /// Validate the merged schema and build the service.
    pub fn build(self) -> ModelResult<ConfigService> {
        let mut sections = self.sections;
        sections.validate()?;
        sections.sort();

        tracing::debug!(
            sections = sections.len(),
            fields = sections.total_fields(),
            "configuration service ready"
        );

        Ok(ConfigService {
            inner: Arc::new(ServiceInner {
                storage: self
                    .storage
                    .unwrap_or_else(|| Arc::new(MemoryStorage::new())),
                sections,
                websites: self.websites,
                options: self.options,
                cache: DashMap::new(),
            }),
        })
    }
}

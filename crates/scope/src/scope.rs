use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScopeError;

/// Numeric identifier of a website.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct WebsiteId(pub u32);

impl fmt::Display for WebsiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a store view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configuration scope: the level at which a value is stored.
///
/// Rendered as a storage prefix: `default`, `websites/<id>`, `stores/<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum Scope {
    /// Global defaults, shared by every website and store.
    Default,
    /// Per-website overrides.
    Website(WebsiteId),
    /// Per-store-view overrides.
    Store(StoreId),
}

impl Scope {
    /// Depth in the fallback hierarchy: default 0, website 1, store 2.
    #[must_use]
    pub fn depth(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Website(_) => 1,
            Self::Store(_) => 2,
        }
    }

    /// Whether this is the global default scope.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// The storage key prefix for this scope.
    #[must_use]
    pub fn prefix(&self) -> String {
        match self {
            Self::Default => "default".to_owned(),
            Self::Website(id) => format!("websites/{id}"),
            Self::Store(id) => format!("stores/{id}"),
        }
    }

    /// The resolution chain starting at this scope and ending at `Default`.
    ///
    /// A store falls back to its owning website when `map` knows it, and
    /// directly to `Default` otherwise.
    #[must_use]
    pub fn fallback_chain(&self, map: &StoreWebsiteMap) -> Vec<Scope> {
        match self {
            Self::Default => vec![Self::Default],
            Self::Website(id) => vec![Self::Website(*id), Self::Default],
            Self::Store(id) => match map.website_of(*id) {
                Some(website) => vec![Self::Store(*id), Self::Website(website), Self::Default],
                None => vec![Self::Store(*id), Self::Default],
            },
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

impl FromStr for Scope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = match s.split_once('/') {
            Some((prefix, id)) => (prefix, Some(id)),
            None => (s, None),
        };

        match (prefix, id) {
            ("default", None) => Ok(Self::Default),
            ("default", Some(_)) => Err(ScopeError::UnexpectedId { input: s.into() }),
            ("websites" | "stores", None) => Err(ScopeError::MissingId { input: s.into() }),
            ("websites", Some(id)) => {
                let id = id.parse::<u32>().map_err(|e| ScopeError::InvalidId {
                    input: s.into(),
                    reason: e.to_string(),
                })?;
                Ok(Self::Website(WebsiteId(id)))
            }
            ("stores", Some(id)) => {
                let id = id.parse::<u32>().map_err(|e| ScopeError::InvalidId {
                    input: s.into(),
                    reason: e.to_string(),
                })?;
                Ok(Self::Store(StoreId(id)))
            }
            _ => Err(ScopeError::UnknownPrefix { input: s.into() }),
        }
    }
}

/// Maps each store view to the website that owns it.
///
/// The fallback chain of a store scope passes through its owning website;
/// this mapping is supplied by the embedder, not read from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreWebsiteMap {
    stores: HashMap<StoreId, WebsiteId>,
}

impl StoreWebsiteMap {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `store` belongs to `website`.
    pub fn insert(&mut self, store: StoreId, website: WebsiteId) {
        self.stores.insert(store, website);
    }

    /// Record a mapping (builder-style, consuming).
    #[must_use]
    pub fn with(mut self, store: StoreId, website: WebsiteId) -> Self {
        self.stores.insert(store, website);
        self
    }

    /// The website owning `store`, if known.
    #[must_use]
    pub fn website_of(&self, store: StoreId) -> Option<WebsiteId> {
        self.stores.get(&store).copied()
    }

    /// The number of known stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no stores are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl FromIterator<(StoreId, WebsiteId)> for StoreWebsiteMap {
    fn from_iter<I: IntoIterator<Item = (StoreId, WebsiteId)>>(iter: I) -> Self {
        Self {
            stores: iter.into_iter().collect(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// The deepest scope at which a field may be overridden.
///
/// Ordered by depth: `Default < Website < Store`. A field with
/// `ScopePerm::Website` accepts writes at the default and website levels
/// but rejects per-store overrides.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScopePerm {
    /// Writable only at the global default scope.
    #[default]
    Default,
    /// Writable at default and website scopes.
    Website,
    /// Writable at every scope.
    Store,
}

impl ScopePerm {
    /// Maximum permitted scope depth.
    #[must_use]
    pub fn depth(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Website => 1,
            Self::Store => 2,
        }
    }

    /// Whether a write at `scope` is permitted.
    #[must_use]
    pub fn allows(&self, scope: Scope) -> bool {
        scope.depth() <= self.depth()
    }
}

use std::fmt;
use std::str::FromStr;

use vitrine_schema::{Route, SchemaError};
use vitrine_scope::Scope;

use crate::error::ModelError;

/// A route pinned to a concrete scope: the full address of one stored
/// value, e.g. `stores/2/web/unsecure/base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedPath {
    route: Route,
    scope: Scope,
}

impl ScopedPath {
    /// Pin a route to a scope.
    #[must_use]
    pub fn new(route: Route, scope: Scope) -> Self {
        Self { route, scope }
    }

    /// The route part.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The scope part.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The storage key this path addresses.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.scope.prefix(), self.route)
    }
}

impl fmt::Display for ScopedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

impl FromStr for ScopedPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The scope prefix is one segment for `default`, two otherwise;
        // the route is always the trailing three segments.
        let segments: Vec<&str> = s.split('/').collect();
        let (scope_part, route_part) = match segments.len() {
            4 => (segments[..1].join("/"), &segments[1..]),
            5 => (segments[..2].join("/"), &segments[2..]),
            _ => {
                return Err(SchemaError::InvalidRoute {
                    route: s.to_owned(),
                    reason: "expected `<scope>/<section>/<group>/<field>`".to_owned(),
                }
                .into());
            }
        };

        let scope: Scope = scope_part.parse().map_err(|e| SchemaError::InvalidRoute {
            route: s.to_owned(),
            reason: format!("bad scope prefix: {e}"),
        })?;
        let route = Route::new(route_part[0], route_part[1], route_part[2])?;
        Ok(Self { route, scope })
    }
}

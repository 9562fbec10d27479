use vitrine_schema::element::Field;
use vitrine_schema::kind::FieldKind;
use vitrine_schema::{BackendKind, Route, Sections};
use vitrine_scope::Scope;

use crate::backend::{join_csv, split_csv};
use crate::error::ModelError;
use crate::service::ConfigService;
use crate::ModelResult;

/// Bind plumbing shared by every accessor: parse the route, look the
/// field up, and check the accessor fits the declared kind.
fn bind_checked(
    sections: &Sections,
    path: &str,
    expected: &str,
    accepts: impl Fn(&Field) -> bool,
) -> ModelResult<Route> {
    let route: Route = path.parse()?;
    let field = sections
        .find_field(&route)
        .ok_or_else(|| ModelError::UnknownRoute {
            route: route.to_string(),
        })?;
    if accepts(field) {
        Ok(route)
    } else {
        Err(ModelError::KindMismatch {
            route: route.to_string(),
            expected: expected.to_owned(),
            actual: format!("{:?}", field.kind).to_lowercase(),
        })
    }
}

macro_rules! accessor_base {
    ($name:ident) => {
        impl $name {
            /// The route this accessor is bound to.
            #[must_use]
            pub fn route(&self) -> &Route {
                &self.route
            }
        }
    };
}

/// Accessor for free-form string fields.
#[derive(Debug, Clone)]
pub struct Str {
    route: Route,
}

accessor_base!(Str);

impl Str {
    /// Bind to a text-like field declared in the schema.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "a string accessor", |field| {
            matches!(
                field.kind,
                FieldKind::Text | FieldKind::Textarea | FieldKind::Select | FieldKind::Time
            )
        })?;
        Ok(Self { route })
    }

    /// Resolve the value at `scope`.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<String>> {
        Ok(svc.value(&self.route, scope).await?.map(|r| r.value))
    }

    /// Write the value at `scope`.
    pub async fn set(&self, svc: &ConfigService, scope: Scope, value: &str) -> ModelResult<()> {
        svc.set(&self.route, scope, value).await
    }
}

/// Accessor for yes/no flags. Canonical wire form is `1`/`0`; reads also
/// accept `true`/`false` and `yes`/`no` from hand-written seeds.
#[derive(Debug, Clone)]
pub struct Bool {
    route: Route,
}

accessor_base!(Bool);

impl Bool {
    /// Bind to a boolean field declared in the schema.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "a boolean accessor", |field| {
            field.kind == FieldKind::Bool
        })?;
        Ok(Self { route })
    }

    /// Resolve the flag at `scope`.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<bool>> {
        let Some(resolved) = svc.value(&self.route, scope).await? else {
            return Ok(None);
        };
        match resolved.value.as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" | "" => Ok(Some(false)),
            other => Err(ModelError::InvalidValue {
                route: self.route.to_string(),
                reason: format!("`{other}` is not a boolean"),
            }),
        }
    }

    /// Write the flag at `scope`, canonicalized to `1`/`0`.
    pub async fn set(&self, svc: &ConfigService, scope: Scope, value: bool) -> ModelResult<()> {
        svc.set(&self.route, scope, if value { "1" } else { "0" })
            .await
    }
}

/// Accessor for integer fields.
#[derive(Debug, Clone)]
pub struct Int {
    route: Route,
}

accessor_base!(Int);

impl Int {
    /// Bind to an integer field declared in the schema.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "an integer accessor", |field| {
            matches!(field.kind, FieldKind::Int | FieldKind::Duration)
        })?;
        Ok(Self { route })
    }

    /// Resolve the value at `scope`. Parse failures are errors, not
    /// silent defaults.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<i64>> {
        let Some(resolved) = svc.value(&self.route, scope).await? else {
            return Ok(None);
        };
        resolved
            .value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ModelError::InvalidValue {
                route: self.route.to_string(),
                reason: format!("`{}` is not an integer", resolved.value),
            })
    }

    /// Write the value at `scope`.
    pub async fn set(&self, svc: &ConfigService, scope: Scope, value: i64) -> ModelResult<()> {
        svc.set(&self.route, scope, &value.to_string()).await
    }
}

/// Accessor for decimal fields (floats and prices).
#[derive(Debug, Clone)]
pub struct Float {
    route: Route,
}

accessor_base!(Float);

impl Float {
    /// Bind to a decimal field declared in the schema.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "a decimal accessor", |field| {
            matches!(field.kind, FieldKind::Float | FieldKind::Price)
        })?;
        Ok(Self { route })
    }

    /// Resolve the value at `scope`.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<f64>> {
        let Some(resolved) = svc.value(&self.route, scope).await? else {
            return Ok(None);
        };
        resolved
            .value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ModelError::InvalidValue {
                route: self.route.to_string(),
                reason: format!("`{}` is not a number", resolved.value),
            })
    }

    /// Write the value at `scope`.
    pub async fn set(&self, svc: &ConfigService, scope: Scope, value: f64) -> ModelResult<()> {
        svc.set(&self.route, scope, &value.to_string()).await
    }
}

/// Accessor for comma-separated string lists.
#[derive(Debug, Clone)]
pub struct StrCsv {
    route: Route,
}

accessor_base!(StrCsv);

impl StrCsv {
    /// Bind to a list-valued field: a multiselect, or any field with the
    /// CSV backend.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "a CSV accessor", |field| {
            field.kind.is_multi() || field.backend == BackendKind::Csv
        })?;
        Ok(Self { route })
    }

    /// Resolve the list at `scope`. An empty stored string is the empty
    /// list.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<Vec<String>>> {
        Ok(svc
            .value(&self.route, scope)
            .await?
            .map(|r| split_csv(&r.value)))
    }

    /// Write the list at `scope`.
    pub async fn set(
        &self,
        svc: &ConfigService,
        scope: Scope,
        values: &[impl AsRef<str>],
    ) -> ModelResult<()> {
        svc.set(&self.route, scope, &join_csv(values)).await
    }
}

/// Accessor for comma-separated integer lists.
#[derive(Debug, Clone)]
pub struct IntCsv {
    route: Route,
}

accessor_base!(IntCsv);

impl IntCsv {
    /// Bind to a list-valued field: a multiselect, or any field with the
    /// CSV backend.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "an integer CSV accessor", |field| {
            field.kind.is_multi() || field.backend == BackendKind::Csv
        })?;
        Ok(Self { route })
    }

    /// Resolve the list at `scope`; every element must parse.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<Vec<i64>>> {
        let Some(resolved) = svc.value(&self.route, scope).await? else {
            return Ok(None);
        };
        split_csv(&resolved.value)
            .into_iter()
            .map(|element| {
                element.parse::<i64>().map_err(|_| ModelError::InvalidValue {
                    route: self.route.to_string(),
                    reason: format!("`{element}` is not an integer"),
                })
            })
            .collect::<Result<Vec<i64>, _>>()
            .map(Some)
    }

    /// Write the list at `scope`.
    pub async fn set(&self, svc: &ConfigService, scope: Scope, values: &[i64]) -> ModelResult<()> {
        let rendered: Vec<String> = values.iter().map(i64::to_string).collect();
        svc.set(&self.route, scope, &join_csv(&rendered)).await
    }
}

/// Accessor for obscured secrets. Values are base64-masked at rest and
/// never logged; resolution returns the clear value.
#[derive(Debug, Clone)]
pub struct Obscured {
    route: Route,
}

accessor_base!(Obscured);

impl Obscured {
    /// Bind to an obscure field declared in the schema.
    pub fn bind(sections: &Sections, path: &str) -> ModelResult<Self> {
        let route = bind_checked(sections, path, "an obscured accessor", |field| {
            field.kind == FieldKind::Obscure
        })?;
        Ok(Self { route })
    }

    /// Resolve the clear value at `scope`.
    pub async fn get(&self, svc: &ConfigService, scope: Scope) -> ModelResult<Option<String>> {
        Ok(svc.value(&self.route, scope).await?.map(|r| r.value))
    }

    /// Write the clear value at `scope`; storage receives the masked form.
    pub async fn set(&self, svc: &ConfigService, scope: Scope, value: &str) -> ModelResult<()> {
        svc.set(&self.route, scope, value).await
    }
}

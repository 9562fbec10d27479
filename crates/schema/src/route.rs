use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Maximum length of a single route segment, in bytes.
const MAX_SEGMENT_LEN: usize = 64;

/// A validated configuration path: exactly `section/group/field`.
///
/// Each segment is lowercase `[a-z0-9_]+`, at most 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route {
    section: String,
    group: String,
    field: String,
}

impl Route {
    /// Build a route from its three segments.
    pub fn new(
        section: impl Into<String>,
        group: impl Into<String>,
        field: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let section = section.into();
        let group = group.into();
        let field = field.into();

        for segment in [&section, &group, &field] {
            check_segment(segment).map_err(|reason| SchemaError::InvalidRoute {
                route: format!("{section}/{group}/{field}"),
                reason,
            })?;
        }

        Ok(Self {
            section,
            group,
            field,
        })
    }

    /// Parse a `section/group/field` string.
    pub fn parse(route: &str) -> Result<Self, SchemaError> {
        route.parse()
    }

    /// The section segment.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The group segment.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The field segment.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

fn check_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("empty segment".to_owned());
    }
    if segment.len() > MAX_SEGMENT_LEN {
        return Err(format!(
            "segment `{segment}` exceeds {MAX_SEGMENT_LEN} bytes"
        ));
    }
    if let Some(bad) = segment
        .bytes()
        .find(|b| !matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_'))
    {
        return Err(format!(
            "segment `{segment}` contains `{}`; only [a-z0-9_] is allowed",
            char::from(bad)
        ));
    }
    Ok(())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.section, self.group, self.field)
    }
}

impl FromStr for Route {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(section), Some(group), Some(field), None) => Self::new(section, group, field),
            _ => Err(SchemaError::InvalidRoute {
                route: s.to_owned(),
                reason: "expected exactly three `/`-separated segments".to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Route {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.to_string()
    }
}

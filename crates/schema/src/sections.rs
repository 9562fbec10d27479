use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::{Field, Group, Section};
use crate::error::SchemaError;
use crate::route::Route;

/// An ordered collection of configuration sections: the full schema of an
/// installation once every module table has been merged in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section (builder-style, consuming).
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Add a section in place.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Fold another table into this one.
    ///
    /// Same-id sections merge groups, same-id groups merge fields, and
    /// same-id fields override attribute-by-attribute: whatever the later
    /// table sets replaces the earlier value, whatever it leaves unset
    /// survives. New ids append in order. Merging an empty table is a
    /// no-op.
    pub fn merge(&mut self, other: Sections) {
        for section in other.sections {
            match self
                .sections
                .iter_mut()
                .find(|s| s.meta.id == section.meta.id)
            {
                Some(existing) => existing.merge(section),
                None => self.sections.push(section),
            }
        }
    }

    /// Recursively sort every level by `sort_order`, then id.
    ///
    /// The sort is stable, so equal keys keep their merge order.
    pub fn sort(&mut self) {
        self.sections
            .sort_by(|a, b| (a.meta.sort_order, &a.meta.id).cmp(&(b.meta.sort_order, &b.meta.id)));
        for section in &mut self.sections {
            section
                .groups
                .sort_by(|a, b| (a.meta.sort_order, &a.meta.id).cmp(&(b.meta.sort_order, &b.meta.id)));
            for group in &mut section.groups {
                group.fields.sort_by(|a, b| {
                    (a.meta.sort_order, &a.meta.id).cmp(&(b.meta.sort_order, &b.meta.id))
                });
            }
        }
    }

    /// Structural validation of the whole tree.
    ///
    /// Reports every problem found, not just the first: duplicate ids at
    /// any level, ids that are not valid route segments, selection fields
    /// without an options source, and obscure fields shipping a default.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut problems = Vec::new();

        check_duplicates(
            self.sections.iter().map(|s| s.meta.id.as_str()),
            "section",
            &mut problems,
        );

        for section in &self.sections {
            check_duplicates(
                section.groups.iter().map(|g| g.meta.id.as_str()),
                &format!("group in `{}`", section.meta.id),
                &mut problems,
            );

            for group in &section.groups {
                check_duplicates(
                    group.fields.iter().map(|f| f.meta.id.as_str()),
                    &format!("field in `{}/{}`", section.meta.id, group.meta.id),
                    &mut problems,
                );

                for field in &group.fields {
                    let route =
                        Route::new(&section.meta.id, &group.meta.id, &field.meta.id);
                    let Ok(route) = route else {
                        problems.push(format!(
                            "`{}/{}/{}` is not a valid route",
                            section.meta.id, group.meta.id, field.meta.id
                        ));
                        continue;
                    };

                    if field.kind.has_options() && field.options.is_none() {
                        problems.push(format!(
                            "selection field `{route}` declares no options source"
                        ));
                    }
                    if field.kind.is_sensitive()
                        && field.default.as_ref().is_some_and(|d| {
                            d.as_str().is_none_or(|s| !s.is_empty())
                        })
                    {
                        problems.push(format!(
                            "obscure field `{route}` must not ship a default"
                        ));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Validation { problems })
        }
    }

    /// Get a section by id.
    #[must_use]
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.meta.id == id)
    }

    /// Get a group by section and group id.
    #[must_use]
    pub fn find_group(&self, section: &str, group: &str) -> Option<&Group> {
        self.find_section(section)?.group(group)
    }

    /// Get the field a route points at.
    #[must_use]
    pub fn find_field(&self, route: &Route) -> Option<&Field> {
        self.find_group(route.section(), route.group())?
            .field(route.field())
    }

    /// Every field default as a flat route-to-value map.
    #[must_use]
    pub fn default_values(&self) -> BTreeMap<Route, serde_json::Value> {
        let mut defaults = BTreeMap::new();
        for section in &self.sections {
            for group in &section.groups {
                for field in &group.fields {
                    let Some(default) = &field.default else {
                        continue;
                    };
                    if let Ok(route) =
                        Route::new(&section.meta.id, &group.meta.id, &field.meta.id)
                    {
                        defaults.insert(route, default.clone());
                    }
                }
            }
        }
        defaults
    }

    /// Total number of fields across all sections.
    #[must_use]
    pub fn total_fields(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.groups)
            .map(|g| g.fields.len())
            .sum()
    }

    /// The number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the schema has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over the sections.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

fn check_duplicates<'a>(
    ids: impl Iterator<Item = &'a str>,
    level: &str,
    problems: &mut Vec<String>,
) {
    let mut seen = Vec::new();
    for id in ids {
        if seen.contains(&id) {
            problems.push(format!("duplicate {level}: `{id}`"));
        } else {
            seen.push(id);
        }
    }
}

impl IntoIterator for Sections {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

impl FromIterator<Section> for Sections {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

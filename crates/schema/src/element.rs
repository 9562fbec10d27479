use serde::{Deserialize, Serialize};
use vitrine_scope::ScopePerm;

use crate::backend::BackendKind;
use crate::depends::DependsRuleSet;
use crate::kind::FieldKind;
use crate::meta::ElementMeta;
use crate::option::OptionsSource;
use crate::validation::ValidationRule;

/// A top-level admin-configuration screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(flatten)]
    pub meta: ElementMeta,

    /// The groups shown on this screen.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(id, label),
            groups: Vec::new(),
        }
    }

    /// Add a group (builder-style).
    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Set the sort order (builder-style).
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.meta.sort_order = sort_order;
        self
    }

    /// Get a group by id.
    #[must_use]
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.meta.id == id)
    }

    /// Fold `other` into this section: same-id groups merge, new ids append.
    pub fn merge(&mut self, other: Section) {
        merge_meta(&mut self.meta, other.meta);
        for group in other.groups {
            match self.groups.iter_mut().find(|g| g.meta.id == group.meta.id) {
                Some(existing) => existing.merge(group),
                None => self.groups.push(group),
            }
        }
    }
}

/// A titled group of fields within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(flatten)]
    pub meta: ElementMeta,

    /// Whether the group renders expanded by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,

    /// The fields in this group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Group {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            meta: ElementMeta::new(id, label),
            expanded: None,
            fields: Vec::new(),
        }
    }

    /// Add a field (builder-style).
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the sort order (builder-style).
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.meta.sort_order = sort_order;
        self
    }

    /// Render expanded by default (builder-style).
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.expanded = Some(true);
        self
    }

    /// Get a field by id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.meta.id == id)
    }

    /// Fold `other` into this group: same-id fields merge, new ids append.
    pub fn merge(&mut self, other: Group) {
        merge_meta(&mut self.meta, other.meta);
        if other.expanded.is_some() {
            self.expanded = other.expanded;
        }
        for field in other.fields {
            match self.fields.iter_mut().find(|f| f.meta.id == field.meta.id) {
                Some(existing) => existing.merge(field),
                None => self.fields.push(field),
            }
        }
    }
}

/// A single configuration value declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(flatten)]
    pub meta: ElementMeta,

    /// The widget and value semantics.
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Deepest scope at which the value may be overridden.
    #[serde(default)]
    pub scope: ScopePerm,

    /// Whether an empty value is rejected.
    #[serde(default)]
    pub required: bool,

    /// Fallback value when no scope carries an override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Where selection kinds get their choices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsSource>,

    /// How the raw stored string maps to the logical value.
    #[serde(default)]
    pub backend: BackendKind,

    /// Visibility conditions on sibling fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends: Option<DependsRuleSet>,

    /// Declarative write-time constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
}

impl Field {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            meta: ElementMeta::new(id, label),
            kind,
            scope: ScopePerm::default(),
            required: false,
            default: None,
            options: None,
            backend: kind.default_backend(),
            depends: None,
            validation: Vec::new(),
        }
    }

    /// Set the default value (builder-style).
    #[must_use]
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the scope permission (builder-style).
    #[must_use]
    pub fn with_scope(mut self, scope: ScopePerm) -> Self {
        self.scope = scope;
        self
    }

    /// Set the options source (builder-style).
    #[must_use]
    pub fn with_options(mut self, options: OptionsSource) -> Self {
        self.options = Some(options);
        self
    }

    /// Override the backend model (builder-style).
    #[must_use]
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Set the comment (builder-style).
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.meta.comment = Some(comment.into());
        self
    }

    /// Set the sort order (builder-style).
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.meta.sort_order = sort_order;
        self
    }

    /// Set the dependency rules (builder-style).
    #[must_use]
    pub fn with_depends(mut self, depends: DependsRuleSet) -> Self {
        self.depends = Some(depends);
        self
    }

    /// Add a validation rule (builder-style).
    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Mark the field required (builder-style).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Hide the field from the admin tree (builder-style).
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.meta.visible = Some(false);
        self
    }

    /// Fold `other` onto this field: each attribute the later table sets
    /// replaces the earlier one; unset attributes keep the earlier value.
    pub fn merge(&mut self, other: Field) {
        merge_meta(&mut self.meta, other.meta);
        self.kind = other.kind;
        if other.scope != ScopePerm::default() {
            self.scope = other.scope;
        }
        if other.required {
            self.required = true;
        }
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.options.is_some() {
            self.options = other.options;
        }
        if other.backend != BackendKind::default() {
            self.backend = other.backend;
        }
        if other.depends.is_some() {
            self.depends = other.depends;
        }
        if !other.validation.is_empty() {
            self.validation = other.validation;
        }
    }
}

/// Attribute-level metadata override shared by all element levels.
fn merge_meta(target: &mut ElementMeta, other: ElementMeta) {
    if !other.label.is_empty() {
        target.label = other.label;
    }
    if other.comment.is_some() {
        target.comment = other.comment;
    }
    if other.sort_order != 0 {
        target.sort_order = other.sort_order;
    }
    if other.visible.is_some() {
        target.visible = other.visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{OptionsSource, yes_no};

    #[test]
    fn builders_chain() {
        let section = Section::new("web", "Web")
            .with_sort_order(20)
            .with_group(
                Group::new("secure", "Secure")
                    .with_sort_order(10)
                    .expanded()
                    .with_field(
                        Field::new("base_url", "Secure Base URL", FieldKind::Text)
                            .with_default("https://shop.example/")
                            .with_scope(ScopePerm::Store)
                            .required(),
                    ),
            );

        assert_eq!(section.meta.sort_order, 20);
        let group = section.group("secure").unwrap();
        assert_eq!(group.expanded, Some(true));
        let field = group.field("base_url").unwrap();
        assert!(field.required);
        assert_eq!(field.scope, ScopePerm::Store);
        assert_eq!(
            field.default,
            Some(serde_json::Value::String("https://shop.example/".into()))
        );
    }

    #[test]
    fn new_field_takes_kind_default_backend() {
        assert_eq!(
            Field::new("key", "Key", FieldKind::Obscure).backend,
            BackendKind::Obscured
        );
        assert_eq!(
            Field::new("types", "Types", FieldKind::Multiselect).backend,
            BackendKind::Csv
        );
        assert_eq!(
            Field::new("name", "Name", FieldKind::Text).backend,
            BackendKind::Plain
        );
    }

    #[test]
    fn field_merge_overrides_set_attributes() {
        let mut base = Field::new("per_page", "Products per Page", FieldKind::Int)
            .with_default(12)
            .with_sort_order(10)
            .with_scope(ScopePerm::Store);

        let overlay = Field::new("per_page", "Items per Page", FieldKind::Int).with_default(24);

        base.merge(overlay);
        assert_eq!(base.meta.label, "Items per Page");
        assert_eq!(base.default, Some(serde_json::json!(24)));
        // Attributes the overlay did not set keep the base value.
        assert_eq!(base.meta.sort_order, 10);
        assert_eq!(base.scope, ScopePerm::Store);
    }

    #[test]
    fn field_merge_keeps_base_when_overlay_unset() {
        let mut base = Field::new("enabled", "Enabled", FieldKind::Bool)
            .with_options(yes_no())
            .with_comment("Turn the carrier on.")
            .required();

        base.merge(Field::new("enabled", "", FieldKind::Bool));

        assert_eq!(base.meta.label, "Enabled");
        assert!(base.options.is_some());
        assert_eq!(base.meta.comment.as_deref(), Some("Turn the carrier on."));
        assert!(base.required);
    }

    #[test]
    fn group_merge_merges_fields_by_id() {
        let mut base = Group::new("frontend", "Frontend")
            .with_field(Field::new("per_page", "Per Page", FieldKind::Int).with_default(12))
            .with_field(Field::new("sort_by", "Sort By", FieldKind::Select));

        let overlay = Group::new("frontend", "")
            .with_field(Field::new("per_page", "", FieldKind::Int).with_default(24))
            .with_field(Field::new("reviews", "Reviews", FieldKind::Bool));

        base.merge(overlay);
        assert_eq!(base.fields.len(), 3);
        assert_eq!(
            base.field("per_page").unwrap().default,
            Some(serde_json::json!(24))
        );
        assert!(base.field("reviews").is_some());
    }

    #[test]
    fn section_merge_merges_groups_by_id() {
        let mut base = Section::new("catalog", "Catalog")
            .with_group(Group::new("frontend", "Frontend"));

        let overlay = Section::new("catalog", "Catalog Settings")
            .with_group(Group::new("frontend", "Storefront"))
            .with_group(Group::new("review", "Reviews"));

        base.merge(overlay);
        assert_eq!(base.meta.label, "Catalog Settings");
        assert_eq!(base.groups.len(), 2);
        assert_eq!(base.group("frontend").unwrap().meta.label, "Storefront");
    }

    #[test]
    fn serde_field_round_trip() {
        let field = Field::new("country", "Country", FieldKind::Select)
            .with_options(OptionsSource::model("country"))
            .with_scope(ScopePerm::Website)
            .with_default("US");

        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"type\":\"select\""));
        assert!(json.contains("\"scope\":\"website\""));

        let parsed: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, field);
    }

    #[test]
    fn serde_defaults_apply_when_absent() {
        let json = r#"{"id":"name","label":"Name","type":"text"}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.scope, ScopePerm::Default);
        assert_eq!(field.backend, BackendKind::Plain);
        assert!(!field.required);
        assert!(field.validation.is_empty());
    }
}

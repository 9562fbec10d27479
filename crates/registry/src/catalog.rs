//! Catalog module: storefront browsing and product reviews.

use vitrine_model::{Bool, Int, IntCsv, ModelResult, Str};
use vitrine_schema::backend::BackendKind;
use vitrine_schema::depends::DependsRuleSet;
use vitrine_schema::element::{Field, Group, Section};
use vitrine_schema::kind::FieldKind;
use vitrine_schema::option::{yes_no, OptionsSource};
use vitrine_schema::validation::ValidationRule;
use vitrine_schema::Sections;
use vitrine_scope::ScopePerm;

/// Route constants for the catalog module.
pub mod paths {
    pub const LIST_PER_PAGE: &str = "catalog/frontend/list_per_page";
    pub const LIST_PER_PAGE_VALUES: &str = "catalog/frontend/list_per_page_values";
    pub const DEFAULT_SORT_BY: &str = "catalog/frontend/default_sort_by";
    pub const REVIEWS_ENABLED: &str = "catalog/review/enabled";
    pub const REVIEWS_ALLOW_GUEST: &str = "catalog/review/allow_guest";
}

/// The catalog module's configuration table.
#[must_use]
pub fn sections() -> Sections {
    Sections::new().with_section(
        Section::new("catalog", "Catalog")
            .with_sort_order(30)
            .with_group(
                Group::new("frontend", "Storefront")
                    .with_sort_order(10)
                    .with_field(
                        Field::new("list_per_page", "Products per Page", FieldKind::Int)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(10)
                            .with_default(12)
                            .with_rule(ValidationRule::min(1.0)),
                    )
                    .with_field(
                        Field::new(
                            "list_per_page_values",
                            "Allowed Products per Page",
                            FieldKind::Text,
                        )
                        .with_scope(ScopePerm::Store)
                        .with_sort_order(20)
                        .with_backend(BackendKind::Csv)
                        .with_default("12,24,36")
                        .with_comment("Choices offered in the page-size dropdown."),
                    )
                    .with_field(
                        Field::new("default_sort_by", "Default Sort Order", FieldKind::Select)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(30)
                            .with_options(OptionsSource::inline([
                                ("position", "Position"),
                                ("name", "Product Name"),
                                ("price", "Price"),
                            ]))
                            .with_default("position"),
                    ),
            )
            .with_group(
                Group::new("review", "Product Reviews")
                    .with_sort_order(20)
                    .with_field(
                        Field::new("enabled", "Enable Reviews", FieldKind::Bool)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_options(yes_no())
                            .with_default(true),
                    )
                    .with_field(
                        Field::new("allow_guest", "Allow Guest Reviews", FieldKind::Bool)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(20)
                            .with_options(yes_no())
                            .with_default(true)
                            .with_depends(DependsRuleSet::when_true("enabled")),
                    ),
            ),
    )
}

/// Typed accessors over the catalog module's fields.
#[derive(Debug, Clone)]
pub struct CatalogBackend {
    pub list_per_page: Int,
    pub list_per_page_values: IntCsv,
    pub default_sort_by: Str,
    pub reviews_enabled: Bool,
    pub reviews_allow_guest: Bool,
}

impl CatalogBackend {
    /// Bind every accessor against the installation schema.
    pub fn bind(sections: &Sections) -> ModelResult<Self> {
        Ok(Self {
            list_per_page: Int::bind(sections, paths::LIST_PER_PAGE)?,
            list_per_page_values: IntCsv::bind(sections, paths::LIST_PER_PAGE_VALUES)?,
            default_sort_by: Str::bind(sections, paths::DEFAULT_SORT_BY)?,
            reviews_enabled: Bool::bind(sections, paths::REVIEWS_ENABLED)?,
            reviews_allow_guest: Bool::bind(sections, paths::REVIEWS_ALLOW_GUEST)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_schema::Route;

    #[test]
    fn table_validates() {
        sections().validate().unwrap();
    }

    #[test]
    fn backend_binds_against_own_table() {
        let backend = CatalogBackend::bind(&sections()).unwrap();
        assert_eq!(
            backend.list_per_page_values.route().to_string(),
            paths::LIST_PER_PAGE_VALUES
        );
    }

    #[test]
    fn guest_reviews_depend_on_reviews_being_enabled() {
        let schema = sections();
        let field = schema
            .find_field(&Route::parse(paths::REVIEWS_ALLOW_GUEST).unwrap())
            .unwrap();

        let depends = field.depends.as_ref().unwrap();
        assert_eq!(depends.dependencies(), vec!["enabled"]);

        let mut values = vitrine_schema::depends::FieldValues::new();
        values.insert("enabled".into(), "1".into());
        assert!(depends.evaluate(&values));

        values.insert("enabled".into(), "0".into());
        assert!(!depends.evaluate(&values));
    }

    #[test]
    fn page_size_defaults_agree() {
        let defaults = sections().default_values();
        assert_eq!(
            defaults.get(&Route::parse(paths::LIST_PER_PAGE).unwrap()),
            Some(&serde_json::json!(12))
        );
        assert_eq!(
            defaults.get(&Route::parse(paths::LIST_PER_PAGE_VALUES).unwrap()),
            Some(&serde_json::json!("12,24,36"))
        );
    }
}

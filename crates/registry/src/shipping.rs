//! Shipping module: origin address and the flat-rate carrier.

use vitrine_model::{Bool, Float, ModelResult, Str, StrCsv};
use vitrine_schema::depends::DependsRuleSet;
use vitrine_schema::element::{Field, Group, Section};
use vitrine_schema::kind::FieldKind;
use vitrine_schema::option::{yes_no, OptionsSource};
use vitrine_schema::validation::ValidationRule;
use vitrine_schema::Sections;
use vitrine_scope::ScopePerm;

/// Route constants for the shipping module.
pub mod paths {
    pub const ORIGIN_COUNTRY: &str = "shipping/origin/country";
    pub const ORIGIN_CITY: &str = "shipping/origin/city";
    pub const ORIGIN_POSTCODE: &str = "shipping/origin/postcode";
    pub const FLAT_RATE_ENABLED: &str = "shipping/flat_rate/enabled";
    pub const FLAT_RATE_TITLE: &str = "shipping/flat_rate/title";
    pub const FLAT_RATE_PRICE: &str = "shipping/flat_rate/price";
    pub const FLAT_RATE_HANDLING_FEE: &str = "shipping/flat_rate/handling_fee";
    pub const FLAT_RATE_COUNTRIES: &str = "shipping/flat_rate/allowed_countries";
}

/// The shipping module's configuration table.
#[must_use]
pub fn sections() -> Sections {
    Sections::new().with_section(
        Section::new("shipping", "Shipping")
            .with_sort_order(50)
            .with_group(
                Group::new("origin", "Shipping Origin")
                    .with_sort_order(10)
                    .with_field(
                        Field::new("country", "Country", FieldKind::Select)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_options(OptionsSource::model("country"))
                            .with_default("US"),
                    )
                    .with_field(
                        Field::new("city", "City", FieldKind::Text)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(20),
                    )
                    .with_field(
                        Field::new("postcode", "ZIP / Postal Code", FieldKind::Text)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(30),
                    ),
            )
            .with_group(
                Group::new("flat_rate", "Flat Rate")
                    .with_sort_order(20)
                    .with_field(
                        Field::new("enabled", "Enabled", FieldKind::Bool)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_options(yes_no())
                            .with_default(true),
                    )
                    .with_field(
                        Field::new("title", "Method Name", FieldKind::Text)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(20)
                            .with_default("Flat Rate"),
                    )
                    .with_field(
                        Field::new("price", "Price", FieldKind::Price)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(30)
                            .with_default(5)
                            .with_rule(ValidationRule::min(0.0))
                            .with_depends(DependsRuleSet::when_true("enabled")),
                    )
                    .with_field(
                        Field::new("handling_fee", "Handling Fee", FieldKind::Price)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(40)
                            .with_default(0)
                            .with_rule(ValidationRule::min(0.0))
                            .with_depends(DependsRuleSet::when_true("enabled")),
                    )
                    .with_field(
                        Field::new(
                            "allowed_countries",
                            "Ship to Applicable Countries",
                            FieldKind::Multiselect,
                        )
                        .with_scope(ScopePerm::Website)
                        .with_sort_order(50)
                        .with_options(OptionsSource::model("country"))
                        .with_depends(DependsRuleSet::when_true("enabled")),
                    ),
            ),
    )
}

/// Typed accessors over the shipping module's fields.
#[derive(Debug, Clone)]
pub struct ShippingBackend {
    pub origin_country: Str,
    pub origin_city: Str,
    pub origin_postcode: Str,
    pub flat_rate_enabled: Bool,
    pub flat_rate_title: Str,
    pub flat_rate_price: Float,
    pub flat_rate_handling_fee: Float,
    pub flat_rate_countries: StrCsv,
}

impl ShippingBackend {
    /// Bind every accessor against the installation schema.
    pub fn bind(sections: &Sections) -> ModelResult<Self> {
        Ok(Self {
            origin_country: Str::bind(sections, paths::ORIGIN_COUNTRY)?,
            origin_city: Str::bind(sections, paths::ORIGIN_CITY)?,
            origin_postcode: Str::bind(sections, paths::ORIGIN_POSTCODE)?,
            flat_rate_enabled: Bool::bind(sections, paths::FLAT_RATE_ENABLED)?,
            flat_rate_title: Str::bind(sections, paths::FLAT_RATE_TITLE)?,
            flat_rate_price: Float::bind(sections, paths::FLAT_RATE_PRICE)?,
            flat_rate_handling_fee: Float::bind(sections, paths::FLAT_RATE_HANDLING_FEE)?,
            flat_rate_countries: StrCsv::bind(sections, paths::FLAT_RATE_COUNTRIES)?,
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
        let backend = ShippingBackend::bind(&sections()).unwrap();
        assert_eq!(
            backend.flat_rate_price.route().to_string(),
            paths::FLAT_RATE_PRICE
        );
    }

    #[test]
    fn carrier_fields_depend_on_the_toggle() {
        let schema = sections();
        for path in [
            paths::FLAT_RATE_PRICE,
            paths::FLAT_RATE_HANDLING_FEE,
            paths::FLAT_RATE_COUNTRIES,
        ] {
            let field = schema.find_field(&Route::parse(path).unwrap()).unwrap();
            assert_eq!(
                field.depends.as_ref().unwrap().dependencies(),
                vec!["enabled"],
                "for `{path}`"
            );
        }
    }

    #[test]
    fn prices_reject_negative_values() {
        let schema = sections();
        let field = schema
            .find_field(&Route::parse(paths::FLAT_RATE_PRICE).unwrap())
            .unwrap();
        assert!(field.validation[0].check("5.5").is_ok());
        assert!(field.validation[0].check("-1").is_err());
    }
}

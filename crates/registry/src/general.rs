//! General module: store identity and locale.

use vitrine_model::{ModelResult, Str};
use vitrine_schema::element::{Field, Group, Section};
use vitrine_schema::kind::FieldKind;
use vitrine_schema::option::OptionsSource;
use vitrine_schema::Sections;
use vitrine_scope::ScopePerm;

/// Route constants for the general module.
pub mod paths {
    pub const STORE_NAME: &str = "general/store_information/name";
    pub const STORE_PHONE: &str = "general/store_information/phone";
    pub const STORE_COUNTRY: &str = "general/store_information/country";
    pub const LOCALE_TIMEZONE: &str = "general/locale/timezone";
    pub const LOCALE_BASE_CURRENCY: &str = "general/locale/base_currency";
    pub const LOCALE_WEIGHT_UNIT: &str = "general/locale/weight_unit";
}

/// The general module's configuration table.
#[must_use]
pub fn sections() -> Sections {
    Sections::new().with_section(
        Section::new("general", "General")
            .with_sort_order(10)
            .with_group(
                Group::new("store_information", "Store Information")
                    .with_sort_order(10)
                    .expanded()
                    .with_field(
                        Field::new("name", "Store Name", FieldKind::Text)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(10)
                            .required(),
                    )
                    .with_field(
                        Field::new("phone", "Store Phone Number", FieldKind::Text)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(20),
                    )
                    .with_field(
                        Field::new("country", "Country", FieldKind::Select)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(30)
                            .with_options(OptionsSource::model("country"))
                            .with_default("US")
                            .required(),
                    ),
            )
            .with_group(
                Group::new("locale", "Locale Options")
                    .with_sort_order(20)
                    .with_field(
                        Field::new("timezone", "Timezone", FieldKind::Select)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_options(OptionsSource::model("timezone"))
                            .with_default("UTC"),
                    )
                    .with_field(
                        Field::new("base_currency", "Base Currency", FieldKind::Select)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(20)
                            .with_options(OptionsSource::model("currency"))
                            .with_default("USD")
                            .with_comment(
                                "Orders are placed and settled in this currency.",
                            ),
                    )
                    .with_field(
                        Field::new("weight_unit", "Weight Unit", FieldKind::Select)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(30)
                            .with_options(OptionsSource::inline([
                                ("lbs", "Pounds"),
                                ("kgs", "Kilograms"),
                            ]))
                            .with_default("lbs"),
                    ),
            ),
    )
}

/// Typed accessors over the general module's fields.
#[derive(Debug, Clone)]
pub struct GeneralBackend {
    pub store_name: Str,
    pub store_phone: Str,
    pub store_country: Str,
    pub timezone: Str,
    pub base_currency: Str,
    pub weight_unit: Str,
}

impl GeneralBackend {
    /// Bind every accessor against the installation schema.
    pub fn bind(sections: &Sections) -> ModelResult<Self> {
        Ok(Self {
            store_name: Str::bind(sections, paths::STORE_NAME)?,
            store_phone: Str::bind(sections, paths::STORE_PHONE)?,
            store_country: Str::bind(sections, paths::STORE_COUNTRY)?,
            timezone: Str::bind(sections, paths::LOCALE_TIMEZONE)?,
            base_currency: Str::bind(sections, paths::LOCALE_BASE_CURRENCY)?,
            weight_unit: Str::bind(sections, paths::LOCALE_WEIGHT_UNIT)?,
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
        let backend = GeneralBackend::bind(&sections()).unwrap();
        assert_eq!(backend.store_name.route().to_string(), paths::STORE_NAME);
        assert_eq!(
            backend.base_currency.route().to_string(),
            paths::LOCALE_BASE_CURRENCY
        );
    }

    #[test]
    fn defaults_are_declared() {
        let defaults = sections().default_values();
        let timezone = Route::parse(paths::LOCALE_TIMEZONE).unwrap();
        assert_eq!(defaults.get(&timezone), Some(&serde_json::json!("UTC")));
        assert_eq!(
            defaults.get(&Route::parse(paths::LOCALE_BASE_CURRENCY).unwrap()),
            Some(&serde_json::json!("USD"))
        );
    }

    #[test]
    fn store_name_is_store_scoped_and_required() {
        let schema = sections();
        let field = schema
            .find_field(&Route::parse(paths::STORE_NAME).unwrap())
            .unwrap();
        assert_eq!(field.scope, ScopePerm::Store);
        assert!(field.required);
    }
}

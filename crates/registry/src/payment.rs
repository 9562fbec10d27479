//! Payment module: the built-in card payment method.

use vitrine_model::{Bool, Float, ModelResult, Obscured, Str, StrCsv};
use vitrine_schema::depends::DependsRuleSet;
use vitrine_schema::element::{Field, Group, Section};
use vitrine_schema::kind::FieldKind;
use vitrine_schema::option::{yes_no, OptionsSource};
use vitrine_schema::validation::ValidationRule;
use vitrine_schema::Sections;
use vitrine_scope::ScopePerm;

/// Route constants for the payment module.
pub mod paths {
    pub const CARD_ENABLED: &str = "payment/card/enabled";
    pub const CARD_TITLE: &str = "payment/card/title";
    pub const CARD_MODE: &str = "payment/card/mode";
    pub const CARD_API_KEY: &str = "payment/card/api_key";
    pub const CARD_SANDBOX_KEY: &str = "payment/card/sandbox_key";
    pub const CARD_TYPES: &str = "payment/card/card_types";
    pub const CARD_MIN_ORDER_TOTAL: &str = "payment/card/min_order_total";
}

/// The payment module's configuration table.
#[must_use]
pub fn sections() -> Sections {
    Sections::new().with_section(
        Section::new("payment", "Payment Methods")
            .with_sort_order(40)
            .with_group(
                Group::new("card", "Credit Card")
                    .with_sort_order(10)
                    .with_field(
                        Field::new("enabled", "Enabled", FieldKind::Bool)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_options(yes_no())
                            .with_default(false),
                    )
                    .with_field(
                        Field::new("title", "Title", FieldKind::Text)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(20)
                            .with_default("Credit Card")
                            .with_comment("Shown to the customer at checkout."),
                    )
                    .with_field(
                        Field::new("mode", "Mode", FieldKind::Select)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(30)
                            .with_options(OptionsSource::inline([
                                ("live", "Live"),
                                ("sandbox", "Sandbox"),
                            ]))
                            .with_default("sandbox")
                            .with_depends(DependsRuleSet::when_true("enabled")),
                    )
                    .with_field(
                        Field::new("api_key", "API Key", FieldKind::Obscure)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(40)
                            .with_depends(DependsRuleSet::All {
                                rules: vec![
                                    DependsRuleSet::when_true("enabled"),
                                    DependsRuleSet::when_equals("mode", "live"),
                                ],
                            }),
                    )
                    .with_field(
                        Field::new("sandbox_key", "Sandbox API Key", FieldKind::Obscure)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(50)
                            .with_depends(DependsRuleSet::All {
                                rules: vec![
                                    DependsRuleSet::when_true("enabled"),
                                    DependsRuleSet::when_equals("mode", "sandbox"),
                                ],
                            }),
                    )
                    .with_field(
                        Field::new("card_types", "Accepted Card Types", FieldKind::Multiselect)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(60)
                            .with_options(OptionsSource::inline([
                                ("visa", "Visa"),
                                ("mastercard", "Mastercard"),
                                ("amex", "American Express"),
                                ("discover", "Discover"),
                            ]))
                            .with_default(serde_json::json!(["visa", "mastercard"])),
                    )
                    .with_field(
                        Field::new("min_order_total", "Minimum Order Total", FieldKind::Price)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(70)
                            .with_default(0)
                            .with_rule(ValidationRule::min(0.0)),
                    ),
            ),
    )
}

/// Typed accessors over the payment module's fields.
#[derive(Debug, Clone)]
pub struct PaymentBackend {
    pub enabled: Bool,
    pub title: Str,
    pub mode: Str,
    pub api_key: Obscured,
    pub sandbox_key: Obscured,
    pub card_types: StrCsv,
    pub min_order_total: Float,
}

impl PaymentBackend {
    /// Bind every accessor against the installation schema.
    pub fn bind(sections: &Sections) -> ModelResult<Self> {
        Ok(Self {
            enabled: Bool::bind(sections, paths::CARD_ENABLED)?,
            title: Str::bind(sections, paths::CARD_TITLE)?,
            mode: Str::bind(sections, paths::CARD_MODE)?,
            api_key: Obscured::bind(sections, paths::CARD_API_KEY)?,
            sandbox_key: Obscured::bind(sections, paths::CARD_SANDBOX_KEY)?,
            card_types: StrCsv::bind(sections, paths::CARD_TYPES)?,
            min_order_total: Float::bind(sections, paths::CARD_MIN_ORDER_TOTAL)?,
        })
    }
}

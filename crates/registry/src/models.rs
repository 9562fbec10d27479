//! Option models referenced by the built-in tables.

use std::sync::Arc;

use vitrine_model::{OptionModelRegistry, StaticOptions};

/// Countries a storefront can ship to or be based in.
#[must_use]
pub fn country() -> StaticOptions {
    StaticOptions::new([
        ("US", "United States"),
        ("CA", "Canada"),
        ("MX", "Mexico"),
        ("BR", "Brazil"),
        ("GB", "United Kingdom"),
        ("DE", "Germany"),
        ("FR", "France"),
        ("IT", "Italy"),
        ("ES", "Spain"),
        ("NL", "Netherlands"),
        ("SE", "Sweden"),
        ("PL", "Poland"),
        ("JP", "Japan"),
        ("AU", "Australia"),
    ])
}

/// Currencies a storefront can price in.
#[must_use]
pub fn currency() -> StaticOptions {
    StaticOptions::new([
        ("USD", "US Dollar"),
        ("CAD", "Canadian Dollar"),
        ("EUR", "Euro"),
        ("GBP", "Pound Sterling"),
        ("SEK", "Swedish Krona"),
        ("PLN", "Polish Zloty"),
        ("JPY", "Japanese Yen"),
        ("AUD", "Australian Dollar"),
        ("BRL", "Brazilian Real"),
    ])
}

/// Timezones for store-local dates.
#[must_use]
pub fn timezone() -> StaticOptions {
    StaticOptions::new([
        ("UTC", "UTC"),
        ("America/New_York", "America/New York"),
        ("America/Chicago", "America/Chicago"),
        ("America/Los_Angeles", "America/Los Angeles"),
        ("Europe/London", "Europe/London"),
        ("Europe/Berlin", "Europe/Berlin"),
        ("Europe/Paris", "Europe/Paris"),
        ("Europe/Warsaw", "Europe/Warsaw"),
        ("Asia/Tokyo", "Asia/Tokyo"),
        ("Australia/Sydney", "Australia/Sydney"),
    ])
}

/// All built-in option models under their conventional keys.
#[must_use]
pub fn registry() -> OptionModelRegistry {
    OptionModelRegistry::new()
        .with("country", Arc::new(country()))
        .with("currency", Arc::new(currency()))
        .with("timezone", Arc::new(timezone()))
}

//! The built-in configuration modules of a Vitrine installation.
//!
//! Each module contributes a declarative table (`sections()`), typed
//! accessors over its own fields (`XxxBackend`), and route constants
//! (`paths`). [`sections`] merges every table into the platform schema.

pub mod catalog;
pub mod general;
pub mod models;
pub mod payment;
pub mod shipping;
pub mod web;

use vitrine_model::OptionModelRegistry;
use vitrine_schema::{SchemaError, Sections};

/// Every built-in module table merged in declaration order, validated,
/// and sorted.
pub fn sections() -> Result<Sections, SchemaError> {
    let mut all = Sections::new();
    for table in [
        general::sections(),
        web::sections(),
        catalog::sections(),
        payment::sections(),
        shipping::sections(),
    ] {
        all.merge(table);
    }
    all.validate()?;
    all.sort();
    Ok(all)
}

/// The option models the built-in tables reference.
#[must_use]
pub fn option_models() -> OptionModelRegistry {
    models::registry()
}

//! Web module: base URLs, TLS, sessions, and CORS.

use vitrine_model::{Bool, Int, ModelResult, Str, StrCsv};
use vitrine_schema::backend::BackendKind;
use vitrine_schema::element::{Field, Group, Section};
use vitrine_schema::kind::FieldKind;
use vitrine_schema::option::yes_no;
use vitrine_schema::validation::ValidationRule;
use vitrine_schema::Sections;
use vitrine_scope::ScopePerm;

/// Route constants for the web module.
pub mod paths {
    pub const UNSECURE_BASE_URL: &str = "web/unsecure/base_url";
    pub const SECURE_BASE_URL: &str = "web/secure/base_url";
    pub const SECURE_USE_IN_FRONTEND: &str = "web/secure/use_in_frontend";
    pub const SECURE_OFFLOADER_HEADER: &str = "web/secure/offloader_header";
    pub const SESSION_LIFETIME: &str = "web/session/lifetime";
    pub const CORS_ALLOWED_ORIGINS: &str = "web/cors/allowed_origins";
}

/// The web module's configuration table.
#[must_use]
pub fn sections() -> Sections {
    Sections::new().with_section(
        Section::new("web", "Web")
            .with_sort_order(20)
            .with_group(
                Group::new("unsecure", "Base URLs")
                    .with_sort_order(10)
                    .expanded()
                    .with_field(
                        Field::new("base_url", "Base URL", FieldKind::Text)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(10)
                            .with_default("http://localhost/")
                            .with_rule(ValidationRule::pattern("^https?://.+/$"))
                            .with_comment("Must end with a trailing slash.")
                            .required(),
                    ),
            )
            .with_group(
                Group::new("secure", "Secure Base URLs")
                    .with_sort_order(20)
                    .with_field(
                        Field::new("base_url", "Secure Base URL", FieldKind::Text)
                            .with_scope(ScopePerm::Store)
                            .with_sort_order(10)
                            .with_default("https://localhost/")
                            .with_rule(ValidationRule::pattern("^https://.+/$")),
                    )
                    .with_field(
                        Field::new("use_in_frontend", "Use Secure URLs on Storefront", FieldKind::Bool)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(20)
                            .with_options(yes_no())
                            .with_default(false),
                    )
                    .with_field(
                        Field::new("offloader_header", "Offloader Header", FieldKind::Text)
                            .with_sort_order(30)
                            .with_default("X-Forwarded-Proto")
                            .with_comment(
                                "Header the TLS terminator sets on forwarded requests.",
                            ),
                    ),
            )
            .with_group(
                Group::new("session", "Session")
                    .with_sort_order(30)
                    .with_field(
                        Field::new("lifetime", "Session Lifetime", FieldKind::Duration)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_default(3600)
                            .with_rule(ValidationRule::min(60.0))
                            .with_rule(ValidationRule::max(31_536_000.0)),
                    ),
            )
            .with_group(
                Group::new("cors", "CORS")
                    .with_sort_order(40)
                    .with_field(
                        Field::new("allowed_origins", "Allowed Origins", FieldKind::Text)
                            .with_scope(ScopePerm::Website)
                            .with_sort_order(10)
                            .with_backend(BackendKind::Csv)
                            .with_comment(
                                "Comma-separated origins allowed to call the storefront API.",
                            ),
                    ),
            ),
    )
}

/// Typed accessors over the web module's fields.
#[derive(Debug, Clone)]
pub struct WebBackend {
    pub unsecure_base_url: Str,
    pub secure_base_url: Str,
    pub secure_in_frontend: Bool,
    pub offloader_header: Str,
    pub session_lifetime: Int,
    pub cors_allowed_origins: StrCsv,
}

impl WebBackend {
    /// Bind every accessor against the installation schema.
    pub fn bind(sections: &Sections) -> ModelResult<Self> {
        Ok(Self {
            unsecure_base_url: Str::bind(sections, paths::UNSECURE_BASE_URL)?,
            secure_base_url: Str::bind(sections, paths::SECURE_BASE_URL)?,
            secure_in_frontend: Bool::bind(sections, paths::SECURE_USE_IN_FRONTEND)?,
            offloader_header: Str::bind(sections, paths::SECURE_OFFLOADER_HEADER)?,
            session_lifetime: Int::bind(sections, paths::SESSION_LIFETIME)?,
            cors_allowed_origins: StrCsv::bind(sections, paths::CORS_ALLOWED_ORIGINS)?,
        })
    }
}

//! The full built-in installation: merged tables, option models, and a
//! live service resolving through them.

use pretty_assertions::assert_eq;
use vitrine_model::{ConfigService, ModelError, ValueOrigin};
use vitrine_registry::{catalog, general, payment, shipping, web};
use vitrine_schema::Route;
use vitrine_scope::{Scope, StoreId, StoreWebsiteMap, WebsiteId};

fn service() -> ConfigService {
    ConfigService::builder()
        .sections(vitrine_registry::sections().expect("built-in tables validate"))
        .websites(StoreWebsiteMap::new().with(StoreId(2), WebsiteId(1)))
        .options(vitrine_registry::option_models())
        .build()
        .expect("service builds")
}

#[test]
fn every_backend_binds_against_the_merged_schema() {
    let schema = vitrine_registry::sections().unwrap();

    general::GeneralBackend::bind(&schema).unwrap();
    web::WebBackend::bind(&schema).unwrap();
    catalog::CatalogBackend::bind(&schema).unwrap();
    payment::PaymentBackend::bind(&schema).unwrap();
    shipping::ShippingBackend::bind(&schema).unwrap();
}

#[tokio::test]
async fn schema_defaults_resolve_out_of_the_box() {
    let svc = service();

    let resolved = svc
        .value(
            &Route::parse(catalog::paths::LIST_PER_PAGE).unwrap(),
            Scope::Store(StoreId(2)),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.value, "12");
    assert_eq!(resolved.origin, ValueOrigin::SchemaDefault);
}

#[tokio::test]
async fn typed_accessors_work_against_the_live_service() {
    let svc = service();
    let schema = vitrine_registry::sections().unwrap();
    let backend = web::WebBackend::bind(&schema).unwrap();

    assert_eq!(
        backend.session_lifetime.get(&svc, Scope::Default).await.unwrap(),
        Some(3600)
    );

    backend
        .unsecure_base_url
        .set(&svc, Scope::Website(WebsiteId(1)), "http://eu.shop.example/")
        .await
        .unwrap();
    assert_eq!(
        backend
            .unsecure_base_url
            .get(&svc, Scope::Store(StoreId(2)))
            .await
            .unwrap(),
        Some("http://eu.shop.example/".to_owned())
    );
}

#[tokio::test]
async fn card_types_validate_against_inline_options() {
    let svc = service();
    let schema = vitrine_registry::sections().unwrap();
    let backend = payment::PaymentBackend::bind(&schema).unwrap();

    backend
        .card_types
        .set(&svc, Scope::Website(WebsiteId(1)), &["visa", "amex"])
        .await
        .unwrap();

    let err = backend
        .card_types
        .set(&svc, Scope::Website(WebsiteId(1)), &["visa", "diners"])
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::NotInOptions { .. }));
}

#[tokio::test]
async fn shipping_countries_validate_against_the_country_model() {
    let svc = service();
    let schema = vitrine_registry::sections().unwrap();
    let backend = shipping::ShippingBackend::bind(&schema).unwrap();

    backend
        .flat_rate_countries
        .set(&svc, Scope::Website(WebsiteId(1)), &["US", "CA", "DE"])
        .await
        .unwrap();

    let err = backend
        .flat_rate_countries
        .set(&svc, Scope::Website(WebsiteId(1)), &["US", "ZZ"])
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::NotInOptions { .. }));
}

#[tokio::test]
async fn api_keys_round_trip_obscured() {
    let svc = service();
    let schema = vitrine_registry::sections().unwrap();
    let backend = payment::PaymentBackend::bind(&schema).unwrap();

    backend
        .api_key
        .set(&svc, Scope::Website(WebsiteId(1)), "sk_live_secret")
        .await
        .unwrap();
    assert_eq!(
        backend
            .api_key
            .get(&svc, Scope::Website(WebsiteId(1)))
            .await
            .unwrap(),
        Some("sk_live_secret".to_owned())
    );
}

#[tokio::test]
async fn session_lifetime_bounds_are_enforced() {
    let svc = service();

    let err = svc
        .set(
            &Route::parse(web::paths::SESSION_LIFETIME).unwrap(),
            Scope::Default,
            "30",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::InvalidValue { .. }));
}

#[tokio::test]
async fn store_scoped_title_overrides_per_store() {
    let svc = service();
    let schema = vitrine_registry::sections().unwrap();
    let backend = shipping::ShippingBackend::bind(&schema).unwrap();

    backend
        .flat_rate_title
        .set(&svc, Scope::Store(StoreId(2)), "Standardversand")
        .await
        .unwrap();

    assert_eq!(
        backend
            .flat_rate_title
            .get(&svc, Scope::Store(StoreId(2)))
            .await
            .unwrap(),
        Some("Standardversand".to_owned())
    );
    // Other stores still see the schema default.
    assert_eq!(
        backend.flat_rate_title.get(&svc, Scope::Default).await.unwrap(),
        Some("Flat Rate".to_owned())
    );
}

#[test]
fn defaults_dump_covers_the_catalog_paths() {
    let schema = vitrine_registry::sections().unwrap();
    let defaults = schema.default_values();

    for path in [
        general::paths::LOCALE_TIMEZONE,
        web::paths::UNSECURE_BASE_URL,
        catalog::paths::DEFAULT_SORT_BY,
        payment::paths::CARD_MODE,
        shipping::paths::FLAT_RATE_TITLE,
    ] {
        assert!(
            defaults.contains_key(&Route::parse(path).unwrap()),
            "expected a default at `{path}`"
        );
    }
}

use std::path::Path;

use vitrine_scope::Scope;

use crate::error::StoreError;
use crate::storage::ConfigStorage;
use crate::StoreResult;

/// Seeds storage from a TOML document.
///
/// Top-level tables select the scope; nested tables and dotted keys form
/// the `section.group.field` path:
///
/// ```toml
/// [default]
/// web.unsecure.base_url = "http://shop.example/"
///
/// [websites.1]
/// web.unsecure.base_url = "http://eu.shop.example/"
///
/// [stores.2.catalog.frontend]
/// list_per_page = 24
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlSeeder;

impl TomlSeeder {
    /// Create a seeder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a TOML document into flat `(storage key, raw value)` pairs.
    pub fn parse(&self, origin: &str, text: &str) -> StoreResult<Vec<(String, String)>> {
        let table: toml::Table = text.parse().map_err(|e: toml::de::Error| {
            StoreError::SeedFormat {
                origin: origin.to_owned(),
                message: e.to_string(),
            }
        })?;

        let mut entries = Vec::new();
        for (top, value) in table {
            match top.as_str() {
                "default" => {
                    let scoped = as_table(origin, &top, value)?;
                    collect_scope(origin, &Scope::Default.prefix(), scoped, &mut entries)?;
                }
                "websites" | "stores" => {
                    let by_id = as_table(origin, &top, value)?;
                    for (id, scoped) in by_id {
                        let id: u32 = id.parse().map_err(|_| StoreError::SeedFormat {
                            origin: origin.to_owned(),
                            message: format!("`{top}` ids must be numeric, got `{id}`"),
                        })?;
                        let prefix = format!("{top}/{id}");
                        let scoped = as_table(origin, &prefix, scoped)?;
                        collect_scope(origin, &prefix, scoped, &mut entries)?;
                    }
                }
                other => {
                    return Err(StoreError::SeedFormat {
                        origin: origin.to_owned(),
                        message: format!(
                            "unknown scope table `{other}`; expected default, websites, or stores"
                        ),
                    });
                }
            }
        }

        entries.sort();
        Ok(entries)
    }

    /// Parse `text` and write every entry through `storage`.
    ///
    /// Returns the number of entries written.
    pub async fn seed_str(
        &self,
        storage: &dyn ConfigStorage,
        origin: &str,
        text: &str,
    ) -> StoreResult<usize> {
        let entries = self.parse(origin, text)?;
        let count = entries.len();
        for (key, value) in entries {
            storage.set(&key, value).await?;
        }
        tracing::debug!(origin, count, "seeded storage from TOML");
        Ok(count)
    }

    /// Read a TOML file and seed `storage` from it.
    pub async fn seed_file(
        &self,
        storage: &dyn ConfigStorage,
        path: &Path,
    ) -> StoreResult<usize> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::SeedIo {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
        self.seed_str(storage, &origin, &text).await
    }
}

fn as_table(origin: &str, at: &str, value: toml::Value) -> StoreResult<toml::Table> {
    match value {
        toml::Value::Table(table) => Ok(table),
        other => Err(StoreError::SeedFormat {
            origin: origin.to_owned(),
            message: format!("`{at}` must be a table, got {}", other.type_str()),
        }),
    }
}

fn collect_scope(
    origin: &str,
    prefix: &str,
    table: toml::Table,
    entries: &mut Vec<(String, String)>,
) -> StoreResult<()> {
    let mut path = Vec::new();
    collect_table(origin, prefix, &mut path, table, entries)
}

fn collect_table(
    origin: &str,
    prefix: &str,
    path: &mut Vec<String>,
    table: toml::Table,
    entries: &mut Vec<(String, String)>,
) -> StoreResult<()> {
    for (key, value) in table {
        path.push(key);
        match value {
            toml::Value::Table(nested) => {
                collect_table(origin, prefix, path, nested, entries)?;
            }
            leaf => {
                if path.len() != 3 {
                    return Err(StoreError::SeedFormat {
                        origin: origin.to_owned(),
                        message: format!(
                            "`{}` does not form a section.group.field path",
                            path.join(".")
                        ),
                    });
                }
                entries.push((format!("{prefix}/{}", path.join("/")), leaf_to_raw(&leaf)));
            }
        }
        path.pop();
    }
    Ok(())
}

/// Raw wire form of a TOML leaf: booleans canonicalize to `1`/`0`,
/// arrays to comma-separated lists.
fn leaf_to_raw(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(n) => n.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(true) => "1".to_owned(),
        toml::Value::Boolean(false) => "0".to_owned(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(leaf_to_raw)
            .collect::<Vec<_>>()
            .join(","),
        // Reached only for inline tables inside arrays; store verbatim.
        toml::Value::Table(table) => toml::Value::Table(table.clone()).to_string(),
    }
}

/// Seeds default-scope values from environment variables.
///
/// `VITRINE__WEB__UNSECURE__BASE_URL=…` becomes
/// `default/web/unsecure/base_url`. Secret-looking keys are redacted from
/// trace logs.
#[derive(Debug, Clone)]
pub struct EnvSeeder {
    prefix: String,
    separator: String,
}

impl Default for EnvSeeder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvSeeder {
    /// Create a seeder with the conventional `VITRINE` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: "VITRINE".to_owned(),
            separator: "__".to_owned(),
        }
    }

    /// Use a different variable prefix (builder-style).
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Seed from the process environment.
    pub async fn seed(&self, storage: &dyn ConfigStorage) -> StoreResult<usize> {
        self.seed_from(storage, std::env::vars()).await
    }

    /// Seed from an explicit variable iterator.
    pub async fn seed_from(
        &self,
        storage: &dyn ConfigStorage,
        vars: impl Iterator<Item = (String, String)>,
    ) -> StoreResult<usize> {
        let lead = format!("{}{}", self.prefix, self.separator);
        let mut count = 0;

        for (name, value) in vars {
            let Some(rest) = name.strip_prefix(&lead) else {
                continue;
            };
            let segments: Vec<String> = rest
                .split(&self.separator)
                .map(str::to_lowercase)
                .collect();
            if segments.len() != 3 || segments.iter().any(String::is_empty) {
                tracing::warn!(var = %name, "skipping malformed seed variable");
                continue;
            }

            if is_sensitive_key(rest) {
                tracing::trace!(var = %name, "seeding from env: [REDACTED]");
            } else {
                tracing::trace!(var = %name, %value, "seeding from env");
            }

            let key = format!("{}/{}", Scope::Default.prefix(), segments.join("/"));
            storage.set(&key, value).await?;
            count += 1;
        }

        tracing::debug!(count, "seeded storage from environment");
        Ok(count)
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    ["password", "secret", "token", "api_key", "private", "credential"]
        .iter()
        .any(|needle| key.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const SEED: &str = r#"
[default]
web.unsecure.base_url = "http://shop.example/"
web.session.lifetime = 3600
catalog.frontend.reviews_enabled = true

[default.shipping.flat_rate]
price = 5.5
countries = ["US", "CA"]

[websites.1]
web.unsecure.base_url = "http://eu.shop.example/"

[stores.2.catalog.frontend]
list_per_page = 24
"#;

    #[tokio::test]
    async fn seeds_every_scope() {
        let store = MemoryStorage::new();
        let count = TomlSeeder::new()
            .seed_str(&store, "test", SEED)
            .await
            .unwrap();
        assert_eq!(count, 7);

        assert_eq!(
            store.get("default/web/unsecure/base_url").await.unwrap(),
            Some("http://shop.example/".to_owned())
        );
        assert_eq!(
            store.get("websites/1/web/unsecure/base_url").await.unwrap(),
            Some("http://eu.shop.example/".to_owned())
        );
        assert_eq!(
            store
                .get("stores/2/catalog/frontend/list_per_page")
                .await
                .unwrap(),
            Some("24".to_owned())
        );
    }

    #[tokio::test]
    async fn canonicalizes_wire_forms() {
        let store = MemoryStorage::new();
        TomlSeeder::new().seed_str(&store, "test", SEED).await.unwrap();

        // Booleans become 1/0, floats keep their decimal form, arrays
        // join as CSV.
        assert_eq!(
            store
                .get("default/catalog/frontend/reviews_enabled")
                .await
                .unwrap(),
            Some("1".to_owned())
        );
        assert_eq!(
            store.get("default/shipping/flat_rate/price").await.unwrap(),
            Some("5.5".to_owned())
        );
        assert_eq!(
            store
                .get("default/shipping/flat_rate/countries")
                .await
                .unwrap(),
            Some("US,CA".to_owned())
        );
    }

    #[test]
    fn rejects_unknown_scope_table() {
        let err = TomlSeeder::new()
            .parse("test", "[shops]\na.b.c = 1\n")
            .unwrap_err();
        assert!(matches!(err, StoreError::SeedFormat { .. }));
        assert!(err.to_string().contains("unknown scope table"));
    }

    #[test]
    fn rejects_non_numeric_scope_id() {
        let err = TomlSeeder::new()
            .parse("test", "[websites.main]\na.b.c = 1\n")
            .unwrap_err();
        assert!(err.to_string().contains("must be numeric"));
    }

    #[test]
    fn rejects_wrong_path_depth() {
        let err = TomlSeeder::new()
            .parse("test", "[default]\nweb.base_url = \"x\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("section.group.field"));

        let err = TomlSeeder::new()
            .parse("test", "[default]\na.b.c.d = \"x\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("section.group.field"));
    }

    #[test]
    fn rejects_invalid_toml() {
        let err = TomlSeeder::new().parse("broken.toml", "not toml [").unwrap_err();
        assert!(matches!(err, StoreError::SeedFormat { .. }));
    }

    #[tokio::test]
    async fn seed_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.toml");
        std::fs::write(&path, SEED).unwrap();

        let store = MemoryStorage::new();
        let count = TomlSeeder::new().seed_file(&store, &path).await.unwrap();
        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn seed_file_missing_is_io_error() {
        let store = MemoryStorage::new();
        let err = TomlSeeder::new()
            .seed_file(&store, Path::new("/nonexistent/seed.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SeedIo { .. }));
    }

    #[tokio::test]
    async fn env_seeder_maps_variables() {
        let store = MemoryStorage::new();
        let vars = vec![
            (
                "VITRINE__WEB__UNSECURE__BASE_URL".to_owned(),
                "http://shop.example/".to_owned(),
            ),
            (
                "VITRINE__PAYMENT__CARD__API_KEY".to_owned(),
                "sk_test_123".to_owned(),
            ),
            ("UNRELATED".to_owned(), "ignored".to_owned()),
            ("VITRINE__TOO__SHALLOW".to_owned(), "ignored".to_owned()),
        ];

        let count = EnvSeeder::new()
            .seed_from(&store, vars.into_iter())
            .await
            .unwrap();
        assert_eq!(count, 2);

        assert_eq!(
            store.get("default/web/unsecure/base_url").await.unwrap(),
            Some("http://shop.example/".to_owned())
        );
        assert_eq!(
            store.get("default/payment/card/api_key").await.unwrap(),
            Some("sk_test_123".to_owned())
        );
    }

    #[tokio::test]
    async fn env_seeder_custom_prefix() {
        let store = MemoryStorage::new();
        let vars = vec![(
            "SHOP__GENERAL__STORE_INFORMATION__NAME".to_owned(),
            "Acme".to_owned(),
        )];

        let count = EnvSeeder::new()
            .with_prefix("SHOP")
            .seed_from(&store, vars.into_iter())
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            store
                .get("default/general/store_information/name")
                .await
                .unwrap(),
            Some("Acme".to_owned())
        );
    }

    #[test]
    fn sensitive_key_detection() {
        assert!(is_sensitive_key("PAYMENT__CARD__API_KEY"));
        assert!(is_sensitive_key("a_secret_b"));
        assert!(!is_sensitive_key("WEB__UNSECURE__BASE_URL"));
    }
}

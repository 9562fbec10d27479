//! `vitrine`: inspect and edit storefront configuration from the shell.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use vitrine_model::{ConfigService, ValueOrigin};
use vitrine_schema::{Route, Sections};
use vitrine_scope::{Scope, StoreId, StoreWebsiteMap, WebsiteId};
use vitrine_store::{EnvSeeder, MemoryStorage, TomlSeeder};

#[derive(Parser)]
#[command(name = "vitrine", version, about = "Storefront configuration toolkit")]
struct Cli {
    /// TOML seed file applied before the command runs.
    #[arg(long, global = true, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Apply VITRINE__SECTION__GROUP__FIELD environment variables as
    /// default-scope values.
    #[arg(long, global = true)]
    env_seed: bool,

    /// Store-to-website mapping, repeatable: STORE=WEBSITE.
    #[arg(long = "website-of", global = true, value_name = "STORE=WEBSITE")]
    website_of: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the merged schema tree.
    Tree {
        /// Limit output to one section.
        #[arg(long)]
        section: Option<String>,
    },

    /// Resolve a value through the scope fallback chain.
    Get {
        /// The section/group/field route.
        route: String,

        /// Scope to resolve from: default, websites/N, or stores/N.
        #[arg(long, default_value = "default")]
        scope: String,

        /// Print obscured values in the clear.
        #[arg(long)]
        reveal: bool,
    },

    /// Write a validated override.
    Set {
        route: String,
        value: String,
        #[arg(long, default_value = "default")]
        scope: String,
    },

    /// Remove an override.
    Unset {
        route: String,
        #[arg(long, default_value = "default")]
        scope: String,
    },

    /// Dump every schema default.
    Defaults {
        #[arg(long, value_enum, default_value = "toml")]
        format: DumpFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Toml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let schema = vitrine_registry::sections().context("built-in schema tables are invalid")?;
    let storage = Arc::new(MemoryStorage::new());

    if let Some(path) = &cli.seed {
        let seeded = TomlSeeder::new()
            .seed_file(storage.as_ref(), path)
            .await
            .context("applying --seed")?;
        tracing::debug!(seeded, seed = %path.display(), "applied seed file");
    }
    if cli.env_seed {
        let seeded = EnvSeeder::new()
            .seed(storage.as_ref())
            .await
            .context("applying --env-seed")?;
        tracing::debug!(seeded, "applied environment seed");
    }

    let service = ConfigService::builder()
        .sections(schema.clone())
        .storage(storage)
        .websites(parse_topology(&cli.website_of)?)
        .options(vitrine_registry::option_models())
        .build()
        .context("building configuration service")?;

    match cli.command {
        Command::Tree { section } => print_tree(&schema, section.as_deref()),
        Command::Get {
            route,
            scope,
            reveal,
        } => get(&service, &route, &scope, reveal).await,
        Command::Set {
            route,
            value,
            scope,
        } => set(&service, &route, &value, &scope).await,
        Command::Unset { route, scope } => unset(&service, &route, &scope).await,
        Command::Defaults { format } => defaults(&schema, format),
    }
}

fn parse_topology(pairs: &[String]) -> Result<StoreWebsiteMap> {
    let mut map = StoreWebsiteMap::new();
    for pair in pairs {
        let Some((store, website)) = pair.split_once('=') else {
            bail!("--website-of expects STORE=WEBSITE, got `{pair}`");
        };
        let store: u32 = store
            .parse()
            .with_context(|| format!("bad store id in `{pair}`"))?;
        let website: u32 = website
            .parse()
            .with_context(|| format!("bad website id in `{pair}`"))?;
        map.insert(StoreId(store), WebsiteId(website));
    }
    Ok(map)
}

fn parse_route(route: &str) -> Result<Route> {
    route
        .parse()
        .with_context(|| format!("`{route}` is not a section/group/field route"))
}

fn parse_scope(scope: &str) -> Result<Scope> {
    scope
        .parse()
        .with_context(|| format!("`{scope}` is not a scope (default, websites/N, stores/N)"))
}

fn print_tree(schema: &Sections, only: Option<&str>) -> Result<()> {
    if let Some(id) = only
        && schema.find_section(id).is_none()
    {
        bail!("no section `{id}` in the schema");
    }

    for section in schema {
        if only.is_some_and(|id| id != section.meta.id) {
            continue;
        }
        println!("{} — {}", section.meta.id, section.meta.label);
        for group in &section.groups {
            println!("  {} — {}", group.meta.id, group.meta.label);
            for field in &group.fields {
                let mut notes = vec![
                    format!("{:?}", field.kind).to_lowercase(),
                    format!("{:?}", field.scope).to_lowercase(),
                ];
                if field.required {
                    notes.push("required".to_owned());
                }
                if !field.meta.is_visible() {
                    notes.push("hidden".to_owned());
                }
                let default = field
                    .default
                    .as_ref()
                    .map(|d| format!("  default: {d}"))
                    .unwrap_or_default();
                println!(
                    "    {:<24} [{}]{}",
                    field.meta.id,
                    notes.join(", "),
                    default
                );
            }
        }
    }
    Ok(())
}

async fn get(service: &ConfigService, route: &str, scope: &str, reveal: bool) -> Result<()> {
    let route = parse_route(route)?;
    let scope = parse_scope(scope)?;

    let field = service.field(&route)?;
    let sensitive = field.kind.is_sensitive();

    match service.value(&route, scope).await? {
        Some(resolved) => {
            let shown = if sensitive && !reveal {
                "[obscured]".to_owned()
            } else {
                resolved.value
            };
            let origin = match resolved.origin {
                ValueOrigin::Scope(at) => format!("from {at}"),
                ValueOrigin::SchemaDefault => "schema default".to_owned(),
            };
            println!("{shown}  ({origin})");
        }
        None => println!("(no value)"),
    }
    Ok(())
}

async fn set(service: &ConfigService, route: &str, value: &str, scope: &str) -> Result<()> {
    let route = parse_route(route)?;
    let scope = parse_scope(scope)?;
    service.set(&route, scope, value).await?;
    println!("set {route} at {scope}");
    Ok(())
}

async fn unset(service: &ConfigService, route: &str, scope: &str) -> Result<()> {
    let route = parse_route(route)?;
    let scope = parse_scope(scope)?;
    if service.delete(&route, scope).await? {
        println!("removed {route} at {scope}");
    } else {
        println!("nothing stored for {route} at {scope}");
    }
    Ok(())
}

fn defaults(schema: &Sections, format: DumpFormat) -> Result<()> {
    let defaults = schema.default_values();
    match format {
        DumpFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = defaults
                .into_iter()
                .map(|(route, value)| (route.to_string(), value))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        DumpFormat::Toml => {
            let mut scope_table = toml::Table::new();
            for (route, value) in defaults {
                let section = scope_table
                    .entry(route.section().to_owned())
                    .or_insert_with(|| toml::Value::Table(toml::Table::new()));
                let Some(section) = section.as_table_mut() else {
                    bail!("default table shape conflict at `{route}`");
                };
                let group = section
                    .entry(route.group().to_owned())
                    .or_insert_with(|| toml::Value::Table(toml::Table::new()));
                let Some(group) = group.as_table_mut() else {
                    bail!("default table shape conflict at `{route}`");
                };
                group.insert(route.field().to_owned(), json_to_toml(value));
            }

            let mut root = toml::Table::new();
            root.insert("default".to_owned(), toml::Value::Table(scope_table));
            println!("{root}");
        }
    }
    Ok(())
}

fn json_to_toml(value: serde_json::Value) -> toml::Value {
    match value {
        serde_json::Value::String(s) => toml::Value::String(s),
        serde_json::Value::Bool(b) => toml::Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else {
                toml::Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::Array(items) => {
            toml::Value::Array(items.into_iter().map(json_to_toml).collect())
        }
        other => toml::Value::String(other.to_string()),
    }
}

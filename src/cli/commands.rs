//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Configuration load (defaults when `--config` is omitted)
//! 2. Logging setup
//! 3. Catalog build: built-in declarations, then `schema_dir`, then audit
//! 4. Command execution, one JSON envelope on stdout
//!
//! A failure at any step, configuration included, is reported through the
//! error envelope and still fails the process.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::catalog;
use crate::config::CatalogConfig;
use crate::schema::{
    audit_defaults, audit_registry, default_table, AuditReport, DefaultEntry, SchemaRegistry,
};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    match execute(Cli::parse_args()) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(&e)?;
            Err(e)
        }
    }
}

/// Configuration, logging, catalog build and one command. Every failure
/// along the way surfaces as the returned error.
pub fn execute(cli: Cli) -> CliResult<Value> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    let registry = build_registry(&config)?;
    run_command(&registry, cli.command)
}

/// Configuration from `path`, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> CliResult<CatalogConfig> {
    match path {
        Some(path) => Ok(CatalogConfig::load(path)?),
        None => Ok(CatalogConfig::default()),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the config level.
fn init_logging(config: &CatalogConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Built-in catalog plus any declarations under `schema_dir`, audited.
pub fn build_registry(config: &CatalogConfig) -> CliResult<SchemaRegistry> {
    let mut registry = catalog::builtin_with(config.validation.clone())?;

    if let Some(dir) = &config.schema_dir {
        let loaded = registry.load_dir(dir)?;
        audit_registry(&registry).into_result()?;
        info!(dir = %dir.display(), loaded, "extra schemas registered");
    }

    Ok(registry)
}

/// Execute one command and return the `data` payload of its envelope.
pub fn run_command(registry: &SchemaRegistry, cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::Entities => Ok(entities(registry)),
        Command::Validate { entity, input } => {
            let value = read_input(input.as_deref())?;
            validate(registry, &entity, &value)
        }
        Command::Defaults { entity } => defaults(registry, entity.as_deref()),
        Command::Audit { defaults } => audit(registry, defaults.as_deref()),
        Command::Export { out } => export(registry, &out),
    }
}

/// Names of every registered entity and enum
pub fn entities(registry: &SchemaRegistry) -> Value {
    let enums: Vec<&str> = registry.enums().map(|e| e.name.as_str()).collect();
    json!({
        "entities": registry.entity_names(),
        "enums": enums
    })
}

/// Validate `value` as `entity`, returning the normalized value
pub fn validate(registry: &SchemaRegistry, entity: &str, value: &Value) -> CliResult<Value> {
    debug!(entity, "validating input");
    let normalized = registry.validate(entity, value)?;
    Ok(json!({
        "entity": entity,
        "value": normalized
    }))
}

/// Default of one entity, or the full default table
pub fn defaults(registry: &SchemaRegistry, entity: Option<&str>) -> CliResult<Value> {
    match entity {
        Some(name) => Ok(registry.default_value(name)?),
        None => Ok(serde_json::to_value(default_table(registry)?)?),
    }
}

/// Registry audit, plus the external default table when one is given.
///
/// Error-level findings fail the command after the report is built.
pub fn audit(registry: &SchemaRegistry, defaults_path: Option<&Path>) -> CliResult<Value> {
    let report = audit_registry(registry);
    let mut data = json!({ "registry": report_json(&report) });

    let mut reports = vec![report];
    if let Some(path) = defaults_path {
        let entries: Vec<DefaultEntry> = serde_json::from_value(read_input(Some(path))?)?;
        let table_report = audit_defaults(registry, &entries);
        data["defaults"] = report_json(&table_report);
        reports.push(table_report);
    }

    for report in reports {
        report.into_result()?;
    }
    Ok(data)
}

fn report_json(report: &AuditReport) -> Value {
    json!({
        "clean": report.is_clean(),
        "errors": report.errors().count(),
        "warnings": report.warnings().count(),
        "findings": report.findings()
    })
}

/// Write every declaration under `out`
pub fn export(registry: &SchemaRegistry, out: &Path) -> CliResult<Value> {
    fs::create_dir_all(out).map_err(|e| {
        CliError::io_error(format!("Failed to create directory {}: {}", out.display(), e))
    })?;

    let written = registry.export_dir(out)?;

    let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    Ok(json!({ "files": files }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::config::UnknownFieldPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_entities_lists_catalog() {
        let registry = builtin().unwrap();
        let data = entities(&registry);

        let names = data["entities"].as_array().unwrap();
        assert!(names.contains(&json!("Address")));
        assert!(data["enums"].as_array().unwrap().contains(&json!("Role")));
    }

    #[test]
    fn test_validate_returns_normalized_value() {
        let registry = builtin().unwrap();
        let input = json!({
            "street": "Main",
            "city": "Austin",
            "state": "TX",
            "postalCode": "73301",
            "country": "us"
        });

        let data = validate(&registry, "Address", &input).unwrap();
        assert_eq!(data["value"]["country"], "US");
    }

    #[test]
    fn test_validate_failure_carries_issues() {
        let registry = builtin().unwrap();
        let err = validate(&registry, "Address", &json!({"street": ""})).unwrap_err();

        assert_eq!(err.code_str(), "CATALOG_VALIDATION_FAILED");
        assert!(err.issues().iter().any(|i| i.path == "street"));
    }

    #[test]
    fn test_defaults_table_covers_every_entity() {
        let registry = builtin().unwrap();
        let table = defaults(&registry, None).unwrap();
        assert_eq!(table.as_array().unwrap().len(), registry.entity_count());

        let err = defaults(&registry, Some("Nope")).unwrap_err();
        assert_eq!(err.code_str(), "CATALOG_UNKNOWN_ENTITY");
    }

    #[test]
    fn test_audit_flags_bad_default_table() {
        let registry = builtin().unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.json");
        let table = json!([
            {"entity": "Tag", "value": {"id": "tag:1", "name": "a", "slug": "a", "postCount": 0}},
            {"entity": "Tag", "value": {"id": "tag:2", "name": "b", "slug": "b", "postCount": 0}}
        ]);
        fs::write(&path, table.to_string()).unwrap();

        let err = audit(&registry, Some(&path)).unwrap_err();
        assert_eq!(err.code_str(), "CATALOG_AUDIT_FAILED");

        assert!(audit(&registry, None).is_ok());
    }

    #[test]
    fn test_export_then_reload() {
        let registry = builtin().unwrap();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("schemas");

        let data = export(&registry, &out).unwrap();
        let files = data["files"].as_array().unwrap();
        assert_eq!(files.len(), registry.entity_count() + registry.enum_count());

        let mut reloaded = SchemaRegistry::new();
        reloaded.load_dir(&out).unwrap();
        assert_eq!(reloaded.entity_names(), registry.entity_names());
    }

    fn cli(config: Option<std::path::PathBuf>, command: Command) -> Cli {
        Cli {
            config,
            verbose: false,
            command,
        }
    }

    #[test]
    fn test_config_error_reaches_error_envelope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"log_level": "loud"}"#).unwrap();

        let err = execute(cli(Some(path), Command::Entities)).unwrap_err();
        assert_eq!(err.code_str(), "CATALOG_CLI_CONFIG_ERROR");

        let envelope = crate::cli::error_envelope(&err);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["code"], "CATALOG_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = execute(cli(Some(dir.path().join("absent.json")), Command::Entities)).unwrap_err();
        assert_eq!(err.code_str(), "CATALOG_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_malformed_schema_dir_is_returned_not_raised() {
        let dir = TempDir::new().unwrap();
        let schemas = dir.path().join("schemas");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(schemas.join("entity_Broken.json"), "{ not json").unwrap();

        let config_path = dir.path().join("config.json");
        fs::write(
            &config_path,
            json!({ "schema_dir": schemas }).to_string(),
        )
        .unwrap();

        let err = execute(cli(Some(config_path), Command::Entities)).unwrap_err();
        assert_eq!(err.code_str(), "CATALOG_MALFORMED_SCHEMA");
        assert_eq!(crate::cli::error_envelope(&err)["status"], "error");
    }

    #[test]
    fn test_execute_without_config_lists_entities() {
        let data = execute(cli(None, Command::Entities)).unwrap();
        assert!(data["entities"].as_array().unwrap().contains(&json!("Order")));
    }

    #[test]
    fn test_build_registry_applies_validation_config() {
        let mut config = CatalogConfig::default();
        config.validation.unknown_fields = UnknownFieldPolicy::Reject;
        let registry = build_registry(&config).unwrap();

        let mut tag = registry.default_value("Tag").unwrap();
        tag["extra"] = json!(1);
        assert!(registry.validate("Tag", &tag).is_err());
    }

    #[test]
    fn test_build_registry_loads_schema_dir() {
        let dir = TempDir::new().unwrap();
        let schema = crate::schema::EntitySchema::record("Widget").field(
            crate::schema::FieldDef::required("label", crate::schema::FieldType::String)
                .rule(crate::schema::Rule::NonEmpty),
        );
        SchemaRegistry::save_entity(dir.path(), &schema).unwrap();

        let config = CatalogConfig {
            schema_dir: Some(dir.path().to_path_buf()),
            ..CatalogConfig::default()
        };
        let registry = build_registry(&config).unwrap();
        assert!(registry.get_entity("Widget").is_some());
    }
}

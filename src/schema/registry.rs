//! Schema registry holding every entity and enum declaration
//!
//! - One namespace shared by entities and enums
//! - A name may be declared once; redeclaration is rejected
//! - Schema files on disk hold one declaration each, named
//!   `entity_<Name>.json` or `enum_<Name>.json`
//! - Malformed schema files are fatal

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::ValidationConfig;

use super::defaults;
use super::errors::{SchemaError, SchemaResult};
use super::types::{Declaration, EntitySchema, EnumDef};
use super::validator::SchemaValidator;
use super::value::{Entity, LiteralEnum};

/// Immutable-after-build registry. Pass it by reference.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: BTreeMap<String, EntitySchema>,
    enums: BTreeMap<String, EnumDef>,
    validation: ValidationConfig,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validation policy used by `validator()` and `decode()`.
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn validation_config(&self) -> &ValidationConfig {
        &self.validation
    }

    fn is_declared(&self, name: &str) -> bool {
        self.entities.contains_key(name) || self.enums.contains_key(name)
    }

    /// Registers an entity schema.
    pub fn register_entity(&mut self, schema: EntitySchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(schema.name.clone(), e))?;

        if self.is_declared(&schema.name) {
            return Err(SchemaError::duplicate_declaration(&schema.name));
        }

        debug!(entity = %schema.name, fields = schema.fields.len(), "registered entity");
        self.entities.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Registers an enum definition.
    pub fn register_enum(&mut self, def: EnumDef) -> SchemaResult<()> {
        if def.name.trim().is_empty() {
            return Err(SchemaError::malformed_schema("<enum>", "Enum name must not be empty"));
        }

        if self.is_declared(&def.name) {
            return Err(SchemaError::duplicate_declaration(&def.name));
        }

        debug!(enum_name = %def.name, variants = def.variants.len(), "registered enum");
        self.enums.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn register_declaration(&mut self, declaration: Declaration) -> SchemaResult<()> {
        match declaration {
            Declaration::Entity(schema) => self.register_entity(schema),
            Declaration::Enum(def) => self.register_enum(def),
        }
    }

    /// Registers the schema of a typed model.
    pub fn register<T: Entity>(&mut self) -> SchemaResult<()> {
        self.register_entity(T::schema())
    }

    /// Registers a typed closed enum.
    pub fn register_literal_enum<E: LiteralEnum>(&mut self) -> SchemaResult<()> {
        self.register_enum(E::enum_def())
    }

    pub fn get_entity(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.get(name)
    }

    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.get(name)
    }

    /// Like `get_entity`, but unknown names are an error.
    pub fn entity(&self, name: &str) -> SchemaResult<&EntitySchema> {
        self.get_entity(name)
            .ok_or_else(|| SchemaError::unknown_entity(name))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntitySchema> {
        self.entities.values()
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.enums.values()
    }

    /// Entity names in sorted order.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Loads every `*.json` declaration in `dir`, in file name order.
    ///
    /// Returns the number of declarations added.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            paths.push(path);
        }
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        info!(dir = %dir.display(), declarations = paths.len(), "loaded schema directory");
        Ok(paths.len())
    }

    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let declaration: Declaration = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        debug!(path = %path.display(), name = declaration.name(), "loading schema file");
        self.register_declaration(declaration)
    }

    /// Writes one declaration into `dir`. Existing files are never overwritten.
    pub fn save_declaration(dir: &Path, declaration: &Declaration) -> SchemaResult<PathBuf> {
        let filename = match declaration {
            Declaration::Entity(schema) => format!("entity_{}.json", schema.name),
            Declaration::Enum(def) => format!("enum_{}.json", def.name),
        };
        let path = dir.join(&filename);

        if path.exists() {
            return Err(SchemaError::duplicate_declaration(declaration.name()));
        }

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(declaration).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }

    pub fn save_entity(dir: &Path, schema: &EntitySchema) -> SchemaResult<PathBuf> {
        Self::save_declaration(dir, &Declaration::Entity(schema.clone()))
    }

    /// Writes every enum and entity into `dir`, enums first.
    pub fn export_dir(&self, dir: &Path) -> SchemaResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.enums.len() + self.entities.len());
        for def in self.enums.values() {
            written.push(Self::save_declaration(dir, &Declaration::Enum(def.clone()))?);
        }
        for schema in self.entities.values() {
            written.push(Self::save_entity(dir, schema)?);
        }
        info!(dir = %dir.display(), files = written.len(), "exported catalog");
        Ok(written)
    }

    pub fn validator(&self) -> SchemaValidator<'_> {
        SchemaValidator::with_config(self, self.validation.clone())
    }

    /// Validates `value` as `entity`, returning the normalized value.
    pub fn validate(&self, entity: &str, value: &Value) -> SchemaResult<Value> {
        self.validator().validate(entity, value)
    }

    /// Validates then deserializes into the typed model.
    pub fn decode<T: Entity>(&self, value: &Value) -> SchemaResult<T> {
        let normalized = self.validate(T::NAME, value)?;
        serde_json::from_value(normalized).map_err(|e| SchemaError::decode_failed(T::NAME, e.to_string()))
    }

    /// Serializes a typed model into its wire form.
    pub fn encode<T: Entity>(&self, model: &T) -> SchemaResult<Value> {
        serde_json::to_value(model).map_err(|e| SchemaError::decode_failed(T::NAME, e.to_string()))
    }

    /// Canonical default value of `entity`.
    pub fn default_value(&self, entity: &str) -> SchemaResult<Value> {
        defaults::default_value(self, entity)
    }

    /// Canonical default instance of a typed model.
    pub fn default_instance<T: Entity>(&self) -> SchemaResult<T> {
        let value = self.default_value(T::NAME)?;
        self.decode(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{FieldDef, FieldType};
    use tempfile::TempDir;

    fn sample_schema() -> EntitySchema {
        EntitySchema::record("User").field(FieldDef::required("name", FieldType::String))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register_entity(sample_schema()).unwrap();

        let schema = registry.get_entity("User");
        assert!(schema.is_some());
        assert_eq!(schema.unwrap().name, "User");
        assert_eq!(registry.entity_count(), 1);
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register_entity(sample_schema()).unwrap();

        let result = registry.register_entity(sample_schema());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code().code(), "CATALOG_DUPLICATE_DECLARATION");
    }

    #[test]
    fn test_enum_and_entity_share_namespace() {
        let mut registry = SchemaRegistry::new();
        registry.register_entity(sample_schema()).unwrap();

        let result = registry.register_enum(EnumDef::new("User", &["A"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();

        SchemaRegistry::save_entity(temp_dir.path(), &sample_schema()).unwrap();
        SchemaRegistry::save_declaration(
            temp_dir.path(),
            &Declaration::Enum(EnumDef::new("Role", &["Admin", "Guest"])),
        )
        .unwrap();

        let mut registry = SchemaRegistry::new();
        let loaded = registry.load_dir(temp_dir.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(registry.get_entity("User"), Some(&sample_schema()));
        assert!(registry.get_enum("Role").is_some());
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        SchemaRegistry::save_entity(temp_dir.path(), &sample_schema()).unwrap();

        let result = SchemaRegistry::save_entity(temp_dir.path(), &sample_schema());
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("entity_Broken.json"), "{ not json").unwrap();

        let mut registry = SchemaRegistry::new();
        let err = registry.load_dir(temp_dir.path()).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.code().code(), "CATALOG_MALFORMED_SCHEMA");
    }

    #[test]
    fn test_non_json_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.txt"), "notes").unwrap();

        let mut registry = SchemaRegistry::new();
        assert_eq!(registry.load_dir(temp_dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_unknown_entity() {
        let registry = SchemaRegistry::new();
        assert!(registry.get_entity("Nope").is_none());
        assert_eq!(
            registry.entity("Nope").unwrap_err().code().code(),
            "CATALOG_UNKNOWN_ENTITY"
        );
    }
}

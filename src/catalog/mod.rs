//! Built-in model catalog
//!
//! The entities and enums shipped with the crate, grouped by area. Each
//! submodule defines typed models together with their declarations and a
//! `register` function that adds them to a registry.
//!
//! `builtin` assembles the whole catalog and refuses to hand it out unless
//! the audit finds no errors.

pub mod auth;
pub mod blog;
pub mod ecommerce;
pub mod edge_cases;
pub mod extreme;

use tracing::info;

use crate::config::ValidationConfig;
use crate::schema::{audit_registry, SchemaRegistry, SchemaResult};

/// Register every built-in declaration into `registry`.
pub fn register_all(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    auth::register(registry)?;
    ecommerce::register(registry)?;
    blog::register(registry)?;
    edge_cases::register(registry)?;
    extreme::register(registry)?;
    Ok(())
}

/// Audited registry holding the whole catalog, with default validation.
pub fn builtin() -> SchemaResult<SchemaRegistry> {
    builtin_with(ValidationConfig::default())
}

/// Audited registry holding the whole catalog.
pub fn builtin_with(validation: ValidationConfig) -> SchemaResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::new().with_validation(validation);
    register_all(&mut registry)?;

    let report = audit_registry(&registry).into_result()?;
    info!(
        entities = registry.entity_count(),
        enums = registry.enum_count(),
        warnings = report.warnings().count(),
        "built-in catalog ready"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;

    #[test]
    fn test_builtin_is_complete_and_clean() {
        let registry = builtin().unwrap();
        assert_eq!(registry.enum_count(), 5);
        assert_eq!(registry.entity_count(), 11 + 11 + 17);
        assert!(audit_registry(&registry).is_clean());
    }

    #[test]
    fn test_register_all_twice_is_duplicate() {
        let mut registry = SchemaRegistry::new();
        register_all(&mut registry).unwrap();

        let err = register_all(&mut registry).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::DuplicateDeclaration);
    }

    #[test]
    fn test_every_default_validates() {
        let registry = builtin().unwrap();
        for name in registry.entity_names() {
            let value = registry.default_value(name).unwrap();
            assert!(registry.validate(name, &value).is_ok(), "default of {} is invalid", name);
        }
    }
}

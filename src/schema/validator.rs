//! Value validation against registered entity schemas
//!
//! Validation semantics:
//! - Required fields must be present and non-null
//! - Optional fields may be absent, null, or a valid value; absent stays
//!   absent and null stays null in the output
//! - Field types match exactly (no coercion; an int field rejects 1.5)
//! - Rules run in declaration order; normalizations rewrite the value seen by
//!   later rules and by the output
//! - Within one field the first failing rule is reported; issues from every
//!   field and nested path are aggregated
//! - Undeclared fields are stripped or rejected per `UnknownFieldPolicy`
//!
//! The input is never mutated. Validation is deterministic.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::{UnknownFieldPolicy, ValidationConfig};

use super::errors::{FieldIssue, SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::rules::{Rule, RuleKind};
use super::types::{EntitySchema, FieldDef, FieldType};

/// Validator that checks JSON values against the registry's schemas.
pub struct SchemaValidator<'a> {
    registry: &'a SchemaRegistry,
    config: ValidationConfig,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator using the registry's validation policy.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self::with_config(registry, registry.validation_config().clone())
    }

    pub fn with_config(registry: &'a SchemaRegistry, config: ValidationConfig) -> Self {
        Self { registry, config }
    }

    /// Validates `value` as an instance of `entity`.
    ///
    /// # Errors
    ///
    /// - CATALOG_UNKNOWN_ENTITY if `entity` is not registered
    /// - CATALOG_VALIDATION_FAILED with every field issue found
    pub fn validate(&self, entity: &str, value: &Value) -> SchemaResult<Value> {
        let schema = self.registry.entity(entity)?;

        let mut issues = Vec::new();
        let normalized = self.validate_object(schema, value, "", 0, &mut issues);

        if issues.is_empty() {
            trace!(entity, "value validated");
            Ok(normalized)
        } else {
            debug!(entity, issues = issues.len(), "validation failed");
            Err(SchemaError::validation_failed(entity, issues))
        }
    }

    /// Returns true if `value` is a valid `entity`.
    pub fn is_valid(&self, entity: &str, value: &Value) -> bool {
        self.validate(entity, value).is_ok()
    }

    fn validate_object(
        &self,
        schema: &EntitySchema,
        value: &Value,
        path: &str,
        depth: usize,
        issues: &mut Vec<FieldIssue>,
    ) -> Value {
        if depth > self.config.max_depth {
            issues.push(FieldIssue::constraint(
                display_path(path),
                "max_depth",
                format!("Value nests deeper than {} levels", self.config.max_depth),
            ));
            return value.clone();
        }

        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                issues.push(FieldIssue::type_mismatch(
                    display_path(path),
                    "object",
                    json_type_name(value),
                ));
                return value.clone();
            }
        };

        for key in obj.keys() {
            if schema.field_named(key).is_some() {
                continue;
            }
            match self.config.unknown_fields {
                UnknownFieldPolicy::Strip => {
                    trace!(entity = %schema.name, field = %key, "stripping undeclared field");
                }
                UnknownFieldPolicy::Reject => issues.push(FieldIssue::constraint(
                    make_path(path, key),
                    "unknown_field",
                    format!("Field '{}' is not declared on {}", key, schema.name),
                )),
            }
        }

        let mut out = Map::new();
        for field in &schema.fields {
            let field_path = make_path(path, &field.name);

            match obj.get(&field.name) {
                None => {
                    if field.required {
                        issues.push(FieldIssue::missing_field(field_path));
                    }
                }
                Some(Value::Null) => {
                    if field.required {
                        issues.push(FieldIssue::type_mismatch(
                            field_path,
                            field.field_type.type_name(),
                            "null",
                        ));
                    } else {
                        out.insert(field.name.clone(), Value::Null);
                    }
                }
                Some(v) => {
                    let normalized =
                        self.validate_value(field, &field.field_type, v, &field_path, depth, issues);
                    out.insert(field.name.clone(), normalized);
                }
            }
        }

        Value::Object(out)
    }

    /// Validates one present, non-null value of type `ty` declared by `field`.
    fn validate_value(
        &self,
        field: &FieldDef,
        ty: &FieldType,
        value: &Value,
        path: &str,
        depth: usize,
        issues: &mut Vec<FieldIssue>,
    ) -> Value {
        match ty {
            FieldType::String => {
                let s = match value.as_str() {
                    Some(s) => s,
                    None => return mismatch(issues, path, ty, value),
                };
                match apply_string_rules(&field.rules, s) {
                    Ok(normalized) => Value::String(normalized),
                    Err(rule) => {
                        issues.push(violation(field, path, rule));
                        value.clone()
                    }
                }
            }
            FieldType::Int { width } => {
                let n = match as_integer(value) {
                    Some(n) => n,
                    None => return mismatch(issues, path, ty, value),
                };
                if !width.contains(n) {
                    let (min, max) = width.bounds();
                    issues.push(custom_violation(
                        field,
                        path,
                        "integer_range",
                        format!("{} must be between {} and {}", field.title(), min, max),
                    ));
                } else if let Some(rule) = first_failing_number_rule(&field.rules, n as f64) {
                    issues.push(violation(field, path, rule));
                }
                value.clone()
            }
            FieldType::Float => {
                let n = match value.as_f64() {
                    Some(n) => n,
                    None => return mismatch(issues, path, ty, value),
                };
                if let Some(rule) = first_failing_number_rule(&field.rules, n) {
                    issues.push(violation(field, path, rule));
                }
                value.clone()
            }
            FieldType::Bool => {
                if !value.is_boolean() {
                    return mismatch(issues, path, ty, value);
                }
                value.clone()
            }
            FieldType::Enum { name } => {
                let literal = match value.as_str() {
                    Some(s) => s,
                    None => return mismatch(issues, path, ty, value),
                };
                match self.registry.get_enum(name) {
                    Some(def) if def.contains(literal) => {}
                    Some(def) => issues.push(custom_violation(
                        field,
                        path,
                        "enum",
                        format!("{} must be one of {}", field.title(), def.variants.join(", ")),
                    )),
                    None => issues.push(FieldIssue::constraint(
                        path,
                        "enum",
                        format!("Enum '{}' is not declared", name),
                    )),
                }
                value.clone()
            }
            FieldType::Object { entity } => match self.registry.get_entity(entity) {
                Some(nested) => self.validate_object(nested, value, path, depth + 1, issues),
                None => {
                    issues.push(FieldIssue::constraint(
                        path,
                        "object",
                        format!("Entity '{}' is not declared", entity),
                    ));
                    value.clone()
                }
            },
            FieldType::Ref { entity } => match value {
                Value::String(id) => {
                    if id.is_empty() {
                        issues.push(custom_violation(
                            field,
                            path,
                            "reference",
                            format!("{} must be a non-empty identifier", field.title()),
                        ));
                    }
                    value.clone()
                }
                Value::Object(_) => match self.registry.get_entity(entity) {
                    Some(nested) => self.validate_object(nested, value, path, depth + 1, issues),
                    None => {
                        issues.push(FieldIssue::constraint(
                            path,
                            "reference",
                            format!("Entity '{}' is not declared", entity),
                        ));
                        value.clone()
                    }
                },
                _ => mismatch(issues, path, ty, value),
            },
            FieldType::Array { element_type } => {
                let items = match value.as_array() {
                    Some(items) => items,
                    None => return mismatch(issues, path, ty, value),
                };
                if depth + 1 > self.config.max_depth {
                    issues.push(FieldIssue::constraint(
                        path,
                        "max_depth",
                        format!("Value nests deeper than {} levels", self.config.max_depth),
                    ));
                    return value.clone();
                }
                if let Some(rule) = field
                    .rules
                    .iter()
                    .find(|r| r.kind() == RuleKind::Array && !r.check_items(items.len()))
                {
                    issues.push(violation(field, path, rule));
                }

                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    if item.is_null() {
                        issues.push(FieldIssue::type_mismatch(
                            &item_path,
                            element_type.type_name(),
                            "null",
                        ));
                        out.push(Value::Null);
                        continue;
                    }
                    out.push(self.validate_value(
                        field,
                        element_type,
                        item,
                        &item_path,
                        depth + 1,
                        issues,
                    ));
                }
                Value::Array(out)
            }
        }
    }
}

/// Runs the string rules of `rules` over `value` in order.
///
/// Returns the normalized string, or the first rule that failed.
pub(crate) fn apply_string_rules<'r>(rules: &'r [Rule], value: &str) -> Result<String, &'r Rule> {
    let mut current = value.to_string();
    for rule in rules.iter().filter(|r| r.kind() == RuleKind::String) {
        match rule.normalize(&current) {
            Some(normalized) => current = normalized,
            None if !rule.check_str(&current) => return Err(rule),
            None => {}
        }
    }
    Ok(current)
}

pub(crate) fn first_failing_number_rule(rules: &[Rule], value: f64) -> Option<&Rule> {
    rules
        .iter()
        .filter(|r| r.kind() == RuleKind::Number)
        .find(|r| !r.check_number(value))
}

fn violation(field: &FieldDef, path: &str, rule: &Rule) -> FieldIssue {
    FieldIssue::constraint(path, rule.name(), field.message_for(rule))
}

fn custom_violation(field: &FieldDef, path: &str, rule_name: &str, default: String) -> FieldIssue {
    let message = field.messages.get(rule_name).cloned().unwrap_or(default);
    FieldIssue::constraint(path, rule_name, message)
}

fn mismatch(issues: &mut Vec<FieldIssue>, path: &str, ty: &FieldType, value: &Value) -> Value {
    issues.push(FieldIssue::type_mismatch(path, ty.type_name(), json_type_name(value)));
    value.clone()
}

fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::IssueKind;
    use crate::schema::types::{EnumDef, IntWidth};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.register_enum(EnumDef::new("Role", &["Admin", "Guest"])).unwrap();
        registry
            .register_entity(
                EntitySchema::value_object("Address")
                    .field(
                        FieldDef::required("street", FieldType::String)
                            .rules([Rule::NonEmpty, Rule::MaxLength(200)]),
                    )
                    .field(
                        FieldDef::required("country", FieldType::String)
                            .rules([Rule::Uppercased, Rule::Length(2)]),
                    ),
            )
            .unwrap();
        registry
            .register_entity(
                EntitySchema::record("User")
                    .field(FieldDef::required("age", FieldType::int(IntWidth::U8)))
                    .field(FieldDef::optional("nickname", FieldType::String).rule(Rule::NonEmpty))
                    .field(FieldDef::required("roles", FieldType::array(FieldType::enumeration("Role"))))
                    .field(FieldDef::optional("address", FieldType::object("Address")))
                    .field(FieldDef::optional("manager", FieldType::reference("User"))),
            )
            .unwrap();
        registry
    }

    fn user() -> Value {
        json!({"id": "user:1", "age": 30, "roles": ["Admin"]})
    }

    #[test]
    fn test_valid_value_passes() {
        let registry = registry();
        let validator = SchemaValidator::new(&registry);
        assert!(validator.validate("User", &user()).is_ok());
    }

    #[test]
    fn test_unknown_entity() {
        let registry = registry();
        let err = SchemaValidator::new(&registry).validate("Nope", &user()).unwrap_err();
        assert_eq!(err.code().code(), "CATALOG_UNKNOWN_ENTITY");
    }

    #[test]
    fn test_missing_required_field() {
        let registry = registry();
        let mut value = user();
        value.as_object_mut().unwrap().remove("age");

        let err = SchemaValidator::new(&registry).validate("User", &value).unwrap_err();
        assert_eq!(err.issues(), &[FieldIssue::missing_field("age")]);
    }

    #[test]
    fn test_required_null_is_type_mismatch() {
        let registry = registry();
        let mut value = user();
        value["age"] = Value::Null;

        let err = SchemaValidator::new(&registry).validate("User", &value).unwrap_err();
        assert_eq!(err.issues(), &[FieldIssue::type_mismatch("age", "int", "null")]);
    }

    #[test]
    fn test_float_rejected_for_int() {
        let registry = registry();
        let mut value = user();
        value["age"] = json!(30.5);

        let err = SchemaValidator::new(&registry).validate("User", &value).unwrap_err();
        assert_eq!(err.issues(), &[FieldIssue::type_mismatch("age", "int", "float")]);
    }

    #[test]
    fn test_int_width_enforced() {
        let registry = registry();
        let mut value = user();
        value["age"] = json!(300);

        let err = SchemaValidator::new(&registry).validate("User", &value).unwrap_err();
        assert_eq!(err.issues()[0].rule(), Some("integer_range"));
    }

    #[test]
    fn test_nullish_keeps_absent_and_null() {
        let registry = registry();
        let validator = SchemaValidator::new(&registry);

        let absent = validator.validate("User", &user()).unwrap();
        assert!(absent.get("nickname").is_none());

        let mut value = user();
        value["nickname"] = Value::Null;
        let null = validator.validate("User", &value).unwrap();
        assert_eq!(null["nickname"], Value::Null);

        value["nickname"] = json!("");
        let err = validator.validate("User", &value).unwrap_err();
        assert_eq!(err.issues()[0].path, "nickname");
        assert_eq!(err.issues()[0].rule(), Some("non_empty"));
    }

    #[test]
    fn test_issues_aggregated_with_nested_paths() {
        let registry = registry();
        let mut value = user();
        value["roles"] = json!(["Admin", "Root"]);
        value["address"] = json!({"street": "", "country": "us"});

        let err = SchemaValidator::new(&registry).validate("User", &value).unwrap_err();
        let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["roles[1]", "address.street"]);
    }

    #[test]
    fn test_normalization_in_output() {
        let registry = registry();
        let mut value = user();
        value["address"] = json!({"street": "Main", "country": "us"});

        let out = SchemaValidator::new(&registry).validate("User", &value).unwrap();
        assert_eq!(out["address"]["country"], "US");
    }

    #[test]
    fn test_reference_accepts_id_or_object() {
        let registry = registry();
        let validator = SchemaValidator::new(&registry);
        let mut value = user();

        value["manager"] = json!("user:2");
        assert!(validator.is_valid("User", &value));

        value["manager"] = user();
        assert!(validator.is_valid("User", &value));

        value["manager"] = json!("");
        assert!(!validator.is_valid("User", &value));

        value["manager"] = json!({"id": "user:3"});
        let err = validator.validate("User", &value).unwrap_err();
        assert!(err.issues().iter().all(|i| i.path.starts_with("manager.")));
    }

    #[test]
    fn test_unknown_fields_stripped_by_default() {
        let registry = registry();
        let mut value = user();
        value["extra"] = json!(1);

        let out = SchemaValidator::new(&registry).validate("User", &value).unwrap();
        assert!(out.get("extra").is_none());
    }

    #[test]
    fn test_unknown_fields_rejected_when_configured() {
        let registry = registry();
        let config = ValidationConfig {
            unknown_fields: UnknownFieldPolicy::Reject,
            ..ValidationConfig::default()
        };
        let mut value = user();
        value["extra"] = json!(1);

        let err = SchemaValidator::with_config(&registry, config)
            .validate("User", &value)
            .unwrap_err();
        assert_eq!(err.issues()[0].path, "extra");
        assert!(matches!(err.issues()[0].kind, IssueKind::ConstraintViolation { .. }));
    }

    #[test]
    fn test_max_depth_enforced() {
        let registry = registry();
        let config = ValidationConfig {
            max_depth: 1,
            ..ValidationConfig::default()
        };
        let mut value = user();
        let mut inner = user();
        inner["manager"] = user();
        value["manager"] = inner;

        let err = SchemaValidator::with_config(&registry, config)
            .validate("User", &value)
            .unwrap_err();
        assert_eq!(err.issues()[0].rule(), Some("max_depth"));
    }

    #[test]
    fn test_root_must_be_object() {
        let registry = registry();
        let err = SchemaValidator::new(&registry).validate("User", &json!([1])).unwrap_err();
        assert_eq!(err.issues(), &[FieldIssue::type_mismatch("$root", "object", "array")]);
    }

    #[test]
    fn test_apply_string_rules_order() {
        let rules = [Rule::Uppercased, Rule::StartsWith("AB".into())];
        assert_eq!(apply_string_rules(&rules, "abc"), Ok("ABC".to_string()));

        let rules = [Rule::StartsWith("AB".into()), Rule::Uppercased];
        assert_eq!(apply_string_rules(&rules, "abc"), Err(&rules[0]));
    }
}

//! Schema-of-schemas audit
//!
//! Checks the declarations themselves rather than documents: names, rule
//! applicability, contradictory bounds, custom message syntax, and whether
//! every entity's synthesized default passes its own validation.
//!
//! `audit_defaults` applies the same scrutiny to an externally supplied
//! default table. Corrupted literals and duplicate blocks are reported, never
//! repaired.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::defaults::{self, numeric_bounds, DefaultEntry};
use super::errors::{SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::rules::{Rule, RuleKind};
use super::types::{EntityKind, EntitySchema, FieldDef, FieldType, Target};

/// Rule names that exist only as validator checks, not as declared rules,
/// but may still carry custom messages.
const IMPLICIT_RULES: &[&str] = &["integer_range", "enum", "reference"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFinding {
    pub severity: FindingSeverity,
    /// `Entity`, `Entity.field` or `Enum`
    pub location: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    findings: Vec<AuditFinding>,
}

impl AuditReport {
    fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.findings.push(AuditFinding {
            severity: FindingSeverity::Error,
            location: location.into(),
            message: message.into(),
        });
    }

    fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.findings.push(AuditFinding {
            severity: FindingSeverity::Warning,
            location: location.into(),
            message: message.into(),
        });
    }

    pub fn findings(&self) -> &[AuditFinding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &AuditFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AuditFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warning)
    }

    /// No error-level findings. Warnings are allowed.
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Fails with CATALOG_AUDIT_FAILED if any error was found.
    pub fn into_result(self) -> SchemaResult<Self> {
        let count = self.errors().count();
        let first = self
            .errors()
            .next()
            .map(|f| format!("{}: {}", f.location, f.message));
        match first {
            None => Ok(self),
            Some(first) => Err(SchemaError::audit_failed(count, first)),
        }
    }
}

/// Audits every declaration in the registry.
pub fn audit_registry(registry: &SchemaRegistry) -> AuditReport {
    let mut report = AuditReport::default();

    for def in registry.enums() {
        audit_enum(&def.name, &def.variants, &mut report);
    }

    for schema in registry.entities() {
        audit_entity(registry, schema, &mut report);
    }

    // Defaults are only meaningful once the declarations are sound.
    if report.is_clean() {
        for schema in registry.entities() {
            audit_entity_default(registry, schema, &mut report);
        }
    }

    log_report("registry", &report);
    report
}

/// Audits an external default table against the registry.
pub fn audit_defaults(registry: &SchemaRegistry, entries: &[DefaultEntry]) -> AuditReport {
    let mut report = AuditReport::default();
    let mut seen: BTreeMap<&str, &Value> = BTreeMap::new();

    for entry in entries {
        let schema = match registry.get_entity(&entry.entity) {
            Some(schema) => schema,
            None => {
                report.error(&entry.entity, "default block for an unknown entity");
                continue;
            }
        };

        if let Some(previous) = seen.get(entry.entity.as_str()) {
            if *previous == &entry.value {
                report.error(&entry.entity, "duplicate default block (identical)");
            } else {
                report.error(&entry.entity, "duplicate default block (conflicting values)");
            }
            continue;
        }
        seen.insert(&entry.entity, &entry.value);

        scan_enum_literals(registry, schema, &entry.value, &entry.entity, &mut report, 0);

        if let Err(err) = registry.validate(&entry.entity, &entry.value) {
            for issue in err.issues() {
                report.error(format!("{}.{}", entry.entity, issue.path), issue.to_string());
            }
        }
    }

    log_report("default table", &report);
    report
}

fn log_report(subject: &str, report: &AuditReport) {
    for finding in report.errors() {
        warn!(location = %finding.location, "{}", finding.message);
    }
    info!(
        subject,
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "audit finished"
    );
}

fn audit_enum(name: &str, variants: &[String], report: &mut AuditReport) {
    if !is_identifier(name) {
        report.error(name, "enum name is not an identifier");
    }
    if variants.is_empty() {
        report.error(name, "enum declares no variants");
    }

    for (i, variant) in variants.iter().enumerate() {
        if variants[..i].contains(variant) {
            report.error(name, format!("duplicate variant '{}'", variant));
        }
        if variant.contains(['"', '\'', '`']) || variant.chars().any(char::is_whitespace) {
            report.error(name, format!("variant {:?} contains quotes or whitespace", variant));
        } else if variant.is_empty() {
            report.error(name, "empty variant literal");
        }
    }
}

fn audit_entity(registry: &SchemaRegistry, schema: &EntitySchema, report: &mut AuditReport) {
    let name = &schema.name;

    if !is_identifier(name) {
        report.error(name, "entity name is not an identifier");
    }

    match (schema.kind, schema.field_named("id")) {
        (EntityKind::Record, None) => report.error(name, "record has no 'id' field"),
        (EntityKind::Record, Some(id)) if !id.required || id.field_type != FieldType::String => {
            report.error(name, "record 'id' must be a required string")
        }
        (EntityKind::ValueObject, Some(_)) => {
            report.warning(name, "value object declares an 'id' field")
        }
        _ => {}
    }

    for (i, field) in schema.fields.iter().enumerate() {
        let location = format!("{}.{}", name, field.name);

        if !is_identifier(&field.name) {
            report.error(&location, "field name is not an identifier");
        }
        if schema.fields[..i].iter().any(|f| f.name == field.name) {
            report.error(&location, "duplicate field name");
        }

        match field.field_type.target() {
            Some(Target::Entity(target)) if registry.get_entity(target).is_none() => {
                report.error(&location, format!("references unknown entity '{}'", target));
            }
            Some(Target::Enum(target)) if registry.get_enum(target).is_none() => {
                report.error(&location, format!("references unknown enum '{}'", target));
            }
            _ => {}
        }

        audit_rules(field, &location, report);
        audit_format(field, &location, report);
        audit_messages(field, &location, report);
    }
}

/// A format must suit the field type. A seed the rules reject still yields a
/// valid default, but one that ignores the format.
fn audit_format(field: &FieldDef, location: &str, report: &mut AuditReport) {
    let format = match &field.format {
        Some(format) => format,
        None => return,
    };

    if !format.applies_to(&field.field_type) {
        report.error(
            location,
            format!("format {:?} does not apply to a {} field", format, field.field_type.type_name()),
        );
    } else if *scalar_type(&field.field_type) == FieldType::String
        && defaults::formatted_default(&field.rules, format).is_none()
    {
        report.warning(location, format!("rules reject the {:?} seed; default ignores the format", format));
    }
}

/// Base type the scalar rules of `field` apply to.
fn scalar_type(ty: &FieldType) -> &FieldType {
    match ty {
        FieldType::Array { element_type } => scalar_type(element_type),
        other => other,
    }
}

fn audit_rules(field: &FieldDef, location: &str, report: &mut AuditReport) {
    let scalar = scalar_type(&field.field_type);
    let is_array = matches!(field.field_type, FieldType::Array { .. });

    for rule in &field.rules {
        let applies = match rule.kind() {
            RuleKind::String => *scalar == FieldType::String,
            RuleKind::Number => matches!(scalar, FieldType::Int { .. } | FieldType::Float),
            RuleKind::Array => is_array,
        };
        if !applies {
            report.error(
                location,
                format!("rule '{}' does not apply to a {} field", rule.name(), field.field_type.type_name()),
            );
        }

        match rule {
            Rule::Pattern(pattern) => {
                if let Err(e) = pattern.regex() {
                    report.error(location, format!("invalid pattern /{}/: {}", pattern, e));
                }
            }
            Rule::Between(lo, hi) if lo > hi => {
                report.error(location, format!("between({}, {}) has lo > hi", lo, hi));
            }
            Rule::MultipleOf(step) if *step == 0.0 || !step.is_finite() => {
                report.error(location, "multiple_of needs a finite, non-zero step");
            }
            _ => {}
        }
    }

    let min_len = field
        .rules
        .iter()
        .filter_map(|r| match r {
            Rule::NonEmpty => Some(1),
            Rule::MinLength(n) | Rule::Length(n) => Some(*n),
            _ => None,
        })
        .max();
    let max_len = field
        .rules
        .iter()
        .filter_map(|r| match r {
            Rule::MaxLength(n) | Rule::Length(n) => Some(*n),
            _ => None,
        })
        .min();

    if let (Some(min), Some(max)) = (min_len, max_len) {
        if min > max {
            report.error(location, format!("minimum length {} exceeds maximum {}", min, max));
        }
    }

    if let Some(max) = max_len {
        for rule in &field.rules {
            if let Rule::StartsWith(s) | Rule::EndsWith(s) | Rule::Includes(s) = rule {
                if s.chars().count() > max {
                    report.error(
                        location,
                        format!("'{}' argument {:?} is longer than maximum length {}", rule.name(), s, max),
                    );
                }
            }
        }
    }

    let min_items = field
        .rules
        .iter()
        .filter_map(|r| match r {
            Rule::MinItems(n) | Rule::ItemsCount(n) => Some(*n),
            _ => None,
        })
        .max();
    let max_items = field
        .rules
        .iter()
        .filter_map(|r| match r {
            Rule::MaxItems(n) | Rule::ItemsCount(n) => Some(*n),
            _ => None,
        })
        .min();
    if let (Some(min), Some(max)) = (min_items, max_items) {
        if min > max {
            report.error(location, format!("minimum item count {} exceeds maximum {}", min, max));
        }
    }

    let width = match scalar {
        FieldType::Int { width } => Some(*width),
        FieldType::Float => None,
        _ => return,
    };
    if let (Some(lo), Some(hi)) = numeric_bounds(&field.rules, width) {
        let empty = lo.value > hi.value || (lo.value == hi.value && !(lo.inclusive && hi.inclusive));
        if empty {
            report.error(location, "numeric rules admit no value");
        }
    }
}

fn audit_messages(field: &FieldDef, location: &str, report: &mut AuditReport) {
    for (rule_name, message) in &field.messages {
        let declared = field.rules.iter().any(|r| r.name() == rule_name)
            || IMPLICIT_RULES.contains(&rule_name.as_str());
        if !declared {
            report.warning(location, format!("message for undeclared rule '{}'", rule_name));
        }

        if let Some(problem) = message_syntax_problem(message) {
            report.error(location, format!("message for '{}' {}", rule_name, problem));
        }
    }
}

/// Detects the damage left by broken message templating: unbalanced
/// backticks or double quotes, and `${` without a closing brace.
fn message_syntax_problem(message: &str) -> Option<&'static str> {
    if message.matches('`').count() % 2 != 0 {
        return Some("has an unbalanced backtick");
    }
    if message.matches('"').count() % 2 != 0 {
        return Some("has an unbalanced double quote");
    }
    let mut rest = message;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => rest = &after[end + 1..],
            None => return Some("has an unterminated ${ expression"),
        }
    }
    None
}

fn audit_entity_default(registry: &SchemaRegistry, schema: &EntitySchema, report: &mut AuditReport) {
    let value = match defaults::default_value(registry, &schema.name) {
        Ok(value) => value,
        Err(e) => {
            report.error(&schema.name, format!("default cannot be derived: {}", e.message()));
            return;
        }
    };

    if let Err(err) = registry.validate(&schema.name, &value) {
        for issue in err.issues() {
            report.error(
                format!("{}.{}", schema.name, issue.path),
                format!("synthesized default fails validation: {}", issue),
            );
        }
    }
}

/// Reports enum literals carrying embedded quote characters, e.g. `'"Pending"`.
fn scan_enum_literals(
    registry: &SchemaRegistry,
    schema: &EntitySchema,
    value: &Value,
    path: &str,
    report: &mut AuditReport,
    depth: usize,
) {
    let obj = match value.as_object() {
        Some(obj) if depth <= registry.validation_config().max_depth => obj,
        _ => return,
    };

    for field in &schema.fields {
        if let Some(v) = obj.get(&field.name) {
            let field_path = format!("{}.{}", path, field.name);
            scan_value(registry, &field.field_type, v, &field_path, report, depth);
        }
    }
}

fn scan_value(
    registry: &SchemaRegistry,
    ty: &FieldType,
    value: &Value,
    path: &str,
    report: &mut AuditReport,
    depth: usize,
) {
    match (ty, value) {
        (FieldType::Enum { name }, Value::String(literal)) => {
            if literal.contains(['"', '\'']) {
                report.error(
                    path,
                    format!("corrupted {} literal {:?} (embedded quotes)", name, literal),
                );
            }
        }
        (FieldType::Array { element_type }, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                scan_value(registry, element_type, item, &format!("{}[{}]", path, i), report, depth + 1);
            }
        }
        (FieldType::Object { entity } | FieldType::Ref { entity }, Value::Object(_)) => {
            if let Some(nested) = registry.get_entity(entity) {
                scan_enum_literals(registry, nested, value, path, report, depth + 1);
            }
        }
        _ => {}
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

//! Canonical default values
//!
//! Every entity has exactly one default instance, derived from its schema so
//! that it passes its own validation:
//! - optional fields are null
//! - arrays are empty unless an item-count rule asks for more
//! - booleans are false, enums take their first declared variant
//! - references hold the id `<snake_case_entity>:default`, and so does the
//!   `id` of a record
//! - value objects hold their own default
//! - strings start from the field's format seed when its rules accept it,
//!   otherwise they are synthesized from the rules alone
//! - numbers are synthesized from the field's rules
//!
//! Derivation is deterministic: the same registry always yields the same
//! values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::format::Format;
use super::registry::SchemaRegistry;
use super::rules::{Rule, RuleKind};
use super::types::{EntityKind, EntitySchema, FieldDef, FieldType, IntWidth};
use super::validator::{apply_string_rules, first_failing_number_rule};

const EMAIL_SEED: &str = "user@example.com";
const URL_SEED: &str = "https://example.com";
const UUID_SEED: &str = "00000000-0000-0000-0000-000000000000";
const IPV4_SEED: &str = "127.0.0.1";
const IPV6_SEED: &str = "::1";

/// One block of a default table: an entity name and its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultEntry {
    pub entity: String,
    pub value: Value,
}

/// Derives the canonical default of `entity`.
pub fn default_value(registry: &SchemaRegistry, entity: &str) -> SchemaResult<Value> {
    let schema = registry.entity(entity)?;
    let mut stack = Vec::new();
    object_default(registry, schema, &mut stack)
}

/// Defaults for every registered entity, in entity name order.
pub fn default_table(registry: &SchemaRegistry) -> SchemaResult<Vec<DefaultEntry>> {
    registry
        .entities()
        .map(|schema| {
            Ok(DefaultEntry {
                entity: schema.name.clone(),
                value: default_value(registry, &schema.name)?,
            })
        })
        .collect()
}

/// Identifier used for reference fields pointing at `entity`.
pub fn default_reference_id(entity: &str) -> String {
    format!("{}:default", snake_case(entity))
}

fn object_default<'r>(
    registry: &'r SchemaRegistry,
    schema: &'r EntitySchema,
    stack: &mut Vec<&'r str>,
) -> SchemaResult<Value> {
    if stack.contains(&schema.name.as_str()) {
        return Err(SchemaError::malformed_schema(
            &schema.name,
            format!("value object cycle through {}", stack.join(" -> ")),
        ));
    }
    stack.push(&schema.name);

    let mut out = Map::new();
    for field in &schema.fields {
        let value = if schema.kind == EntityKind::Record && field.name == "id" {
            Value::String(default_reference_id(&schema.name))
        } else if field.required {
            type_default(registry, field, &field.field_type, stack)?
        } else {
            Value::Null
        };
        out.insert(field.name.clone(), value);
    }

    stack.pop();
    Ok(Value::Object(out))
}

fn type_default<'r>(
    registry: &'r SchemaRegistry,
    field: &'r FieldDef,
    ty: &'r FieldType,
    stack: &mut Vec<&'r str>,
) -> SchemaResult<Value> {
    let value = match ty {
        FieldType::String => Value::String(string_default(&field.rules, field.format.as_ref())),
        FieldType::Int { width } => int_default(&field.rules, *width),
        FieldType::Float => Value::from(float_default(&field.rules)),
        FieldType::Bool => Value::Bool(false),
        FieldType::Enum { name } => {
            let def = registry
                .get_enum(name)
                .ok_or_else(|| SchemaError::unknown_enum(name))?;
            let first = def.variants.first().ok_or_else(|| {
                SchemaError::malformed_schema(name, "enum declares no variants")
            })?;
            Value::String(first.clone())
        }
        FieldType::Object { entity } => {
            let nested = registry.entity(entity)?;
            object_default(registry, nested, stack)?
        }
        FieldType::Ref { entity } => Value::String(default_reference_id(entity)),
        FieldType::Array { element_type } => {
            let count = min_items(&field.rules);
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(type_default(registry, field, element_type, stack)?);
            }
            Value::Array(items)
        }
    };
    Ok(value)
}

fn min_items(rules: &[Rule]) -> usize {
    rules
        .iter()
        .filter_map(|r| match r {
            Rule::MinItems(n) | Rule::ItemsCount(n) => Some(*n),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// The format seed, normalized, when `rules` accept it. Otherwise the
/// shortest string synthesized from `rules` alone.
pub(crate) fn string_default(rules: &[Rule], format: Option<&Format>) -> String {
    if let Some(seeded) = format.and_then(|f| formatted_default(rules, f)) {
        return seeded;
    }
    synthesize_string(rules)
}

/// Seed of `format` after the field's string rules, if none of them fail.
pub(crate) fn formatted_default(rules: &[Rule], format: &Format) -> Option<String> {
    apply_string_rules(rules, &format.seed()).ok()
}

/// Builds the shortest natural string satisfying `rules`: a rule seed,
/// then prefix and required substrings, padding up to the minimum length
/// ahead of any suffix, and finally the declared normalizations.
fn synthesize_string(rules: &[Rule]) -> String {
    let mut value = rules
        .iter()
        .find_map(|r| match r {
            Rule::Email => Some(EMAIL_SEED),
            Rule::Url => Some(URL_SEED),
            Rule::Uuid => Some(UUID_SEED),
            Rule::Ip | Rule::IpV4 => Some(IPV4_SEED),
            Rule::IpV6 => Some(IPV6_SEED),
            _ => None,
        })
        .unwrap_or_default()
        .to_string();

    let fill = if rules.iter().any(|r| matches!(r, Rule::Digits | Rule::Hex)) {
        '0'
    } else {
        'a'
    };

    for rule in rules {
        match rule {
            Rule::StartsWith(prefix) if !value.starts_with(prefix.as_str()) => {
                value = format!("{}{}", prefix, value);
            }
            Rule::Includes(needle) if !value.contains(needle.as_str()) => {
                value.push_str(needle);
            }
            _ => {}
        }
    }

    let suffix = rules.iter().find_map(|r| match r {
        Rule::EndsWith(s) if !value.ends_with(s.as_str()) => Some(s.clone()),
        _ => None,
    });

    let min_len = rules
        .iter()
        .filter_map(|r| match r {
            Rule::NonEmpty => Some(1),
            Rule::MinLength(n) | Rule::Length(n) => Some(*n),
            _ => None,
        })
        .max()
        .unwrap_or(0);

    let suffix_len = suffix.as_ref().map_or(0, |s| s.chars().count());
    let current = value.chars().count() + suffix_len;
    if current < min_len {
        value.extend(std::iter::repeat(fill).take(min_len - current));
    }
    if let Some(s) = suffix {
        value.push_str(&s);
    }

    match apply_string_rules(rules, &value) {
        Ok(normalized) => normalized,
        Err(_) => value,
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Bound {
    pub(crate) value: f64,
    pub(crate) inclusive: bool,
}

fn incl(value: f64) -> Bound {
    Bound { value, inclusive: true }
}

fn excl(value: f64) -> Bound {
    Bound { value, inclusive: false }
}

/// Tightens a lower bound; on equal values the exclusive side wins.
fn raise(lower: &mut Option<Bound>, b: Bound) {
    *lower = Some(match *lower {
        Some(cur) if cur.value > b.value => cur,
        Some(cur) if cur.value == b.value => Bound {
            value: cur.value,
            inclusive: cur.inclusive && b.inclusive,
        },
        _ => b,
    });
}

fn cap(upper: &mut Option<Bound>, b: Bound) {
    *upper = Some(match *upper {
        Some(cur) if cur.value < b.value => cur,
        Some(cur) if cur.value == b.value => Bound {
            value: cur.value,
            inclusive: cur.inclusive && b.inclusive,
        },
        _ => b,
    });
}

/// Interval described by the numeric rules, intersected with `width` if given.
pub(crate) fn numeric_bounds(rules: &[Rule], width: Option<IntWidth>) -> (Option<Bound>, Option<Bound>) {
    let mut lower = None;
    let mut upper = None;

    if let Some(width) = width {
        let (min, max) = width.bounds();
        raise(&mut lower, incl(min as f64));
        cap(&mut upper, incl(max as f64));
    }

    for rule in rules.iter().filter(|r| r.kind() == RuleKind::Number) {
        match rule {
            Rule::Positive => raise(&mut lower, excl(0.0)),
            Rule::NonNegative => raise(&mut lower, incl(0.0)),
            Rule::Negative => cap(&mut upper, excl(0.0)),
            Rule::NonPositive => cap(&mut upper, incl(0.0)),
            Rule::GreaterThan(x) => raise(&mut lower, excl(*x)),
            Rule::GreaterThanOrEqualTo(x) => raise(&mut lower, incl(*x)),
            Rule::LessThan(x) => cap(&mut upper, excl(*x)),
            Rule::LessThanOrEqualTo(x) => cap(&mut upper, incl(*x)),
            Rule::Between(lo, hi) => {
                raise(&mut lower, incl(*lo));
                cap(&mut upper, incl(*hi));
            }
            _ => {}
        }
    }

    (lower, upper)
}

/// Picks 0 when allowed, otherwise the allowed value nearest to zero.
fn pick_number(rules: &[Rule], width: Option<IntWidth>) -> f64 {
    if first_failing_number_rule(rules, 0.0).is_none() {
        return 0.0;
    }

    let integral = width.is_some();
    let (lower, upper) = numeric_bounds(rules, width);

    let mut candidate = match (lower, upper) {
        (Some(lo), hi) if lo.value >= 0.0 => match (lo.inclusive, integral) {
            (true, true) => lo.value.ceil(),
            (true, false) => lo.value,
            (false, true) => lo.value.floor() + 1.0,
            (false, false) => match hi {
                Some(hi) if hi.value - lo.value <= 1.0 => (lo.value + hi.value) / 2.0,
                _ => lo.value + 1.0,
            },
        },
        (lo, Some(hi)) if hi.value <= 0.0 => match (hi.inclusive, integral) {
            (true, true) => hi.value.floor(),
            (true, false) => hi.value,
            (false, true) => hi.value.ceil() - 1.0,
            (false, false) => match lo {
                Some(lo) if hi.value - lo.value <= 1.0 => (lo.value + hi.value) / 2.0,
                _ => hi.value - 1.0,
            },
        },
        _ => 0.0,
    };

    if let Some(step) = rules.iter().find_map(|r| match r {
        Rule::MultipleOf(step) if *step != 0.0 => Some(*step),
        _ => None,
    }) {
        if !Rule::MultipleOf(step).check_number(candidate) {
            candidate = (candidate / step).ceil() * step;
        }
    }

    candidate
}

pub(crate) fn float_default(rules: &[Rule]) -> f64 {
    pick_number(rules, None)
}

pub(crate) fn int_default(rules: &[Rule], width: IntWidth) -> Value {
    let n = pick_number(rules, Some(width)) as i128;
    match i64::try_from(n) {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(u64::try_from(n).unwrap_or(u64::MAX)),
    }
}

/// `EdgeCaseUser` -> `edge_case_user`
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: integer with a fixed Rust width (u8 .. i64, usize, isize)
//! - float: 64-bit floating point
//! - bool: Boolean
//! - enum: one literal of a registered enum
//! - object: nested value object, always inline
//! - ref: identifier string or inline object of another entity
//! - array: homogeneous array with element type
//!
//! Fields are kept in declaration order so that validation output and error
//! lists are deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::format::Format;
use super::rules::Rule;

/// Integer widths carried over from the Rust field types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    U8,
    U16,
    #[default]
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntWidth {
    /// Inclusive range representable by this width.
    pub fn bounds(&self) -> (i128, i128) {
        match self {
            IntWidth::U8 => (0, u8::MAX as i128),
            IntWidth::U16 => (0, u16::MAX as i128),
            IntWidth::U32 => (0, u32::MAX as i128),
            IntWidth::U64 | IntWidth::Usize => (0, u64::MAX as i128),
            IntWidth::I8 => (i8::MIN as i128, i8::MAX as i128),
            IntWidth::I16 => (i16::MIN as i128, i16::MAX as i128),
            IntWidth::I32 => (i32::MIN as i128, i32::MAX as i128),
            IntWidth::I64 | IntWidth::Isize => (i64::MIN as i128, i64::MAX as i128),
        }
    }

    /// Returns true if `value` fits in this width.
    pub fn contains(&self, value: i128) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
            IntWidth::Usize => "usize",
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::Isize => "isize",
        }
    }
}

/// Supported field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Integer of a fixed width
    Int {
        #[serde(default)]
        width: IntWidth,
    },
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Literal of a registered enum
    Enum {
        /// Enum name in the registry. Serialized as `enum` so it never
        /// collides with the owning field's `name`.
        #[serde(rename = "enum")]
        name: String,
    },
    /// Nested value object, validated inline
    Object {
        /// Entity name in the registry
        entity: String,
    },
    /// Identifier string or inline object of another entity
    Ref {
        /// Entity name in the registry
        entity: String,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    pub fn int(width: IntWidth) -> Self {
        FieldType::Int { width }
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        FieldType::Enum { name: name.into() }
    }

    pub fn object(entity: impl Into<String>) -> Self {
        FieldType::Object {
            entity: entity.into(),
        }
    }

    pub fn reference(entity: impl Into<String>) -> Self {
        FieldType::Ref {
            entity: entity.into(),
        }
    }

    pub fn array(element_type: FieldType) -> Self {
        FieldType::Array {
            element_type: Box::new(element_type),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int { .. } => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Enum { .. } => "enum",
            FieldType::Object { .. } => "object",
            FieldType::Ref { .. } => "string | object",
            FieldType::Array { .. } => "array",
        }
    }

    /// Entity or enum names this type points at, innermost first.
    pub fn target(&self) -> Option<Target<'_>> {
        match self {
            FieldType::Enum { name } => Some(Target::Enum(name)),
            FieldType::Object { entity } | FieldType::Ref { entity } => Some(Target::Entity(entity)),
            FieldType::Array { element_type } => element_type.target(),
            _ => None,
        }
    }
}

/// A named declaration a field type depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Entity(&'a str),
    Enum(&'a str),
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Wire name of the field
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Required fields must be present and non-null. Optional fields are
    /// nullish: absent, null, or a valid value.
    pub required: bool,
    /// Constraints applied in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// Custom messages keyed by rule name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
    /// What the value represents; seeds the default of string fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl FieldDef {
    /// Create a required field
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            rules: Vec::new(),
            messages: BTreeMap::new(),
            format: None,
        }
    }

    /// Create a nullish field
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Append one rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules, keeping their order
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Override the message reported when `rule_name` fails
    pub fn message(mut self, rule_name: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(rule_name.into(), message.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Human-readable field label, e.g. `postalCode` -> `Postal Code`
    pub fn title(&self) -> String {
        title_case(&self.name)
    }

    /// Message for a failed rule: the custom one if declared, otherwise the
    /// rule's default phrasing.
    pub fn message_for(&self, rule: &Rule) -> String {
        match self.messages.get(rule.name()) {
            Some(custom) => custom.clone(),
            None => rule.describe(&self.title()),
        }
    }
}

/// Whether an entity is persisted (has an `id`) or a plain value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Record,
    ValueObject,
}

/// Complete entity schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Unique entity name
    pub name: String,
    pub kind: EntityKind,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    /// Create a persisted entity. The required string `id` is declared first.
    pub fn record(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Record,
            description: None,
            fields: vec![FieldDef::required("id", FieldType::String)],
        }
    }

    /// Create a value object (no identifier)
    pub fn value_object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::ValueObject,
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field definition
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by wire name
    pub fn field_named(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a document).
    ///
    /// Only the checks needed to accept a declaration into a registry; the
    /// full schema-of-schemas pass lives in `audit`.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Entity name must not be empty".into());
        }

        if self.kind == EntityKind::Record {
            match self.field_named("id") {
                None => return Err(format!("Record '{}' must define an 'id' field", self.name)),
                Some(id) if !id.required => {
                    return Err(format!("'id' field of '{}' must be required", self.name))
                }
                Some(id) if id.field_type != FieldType::String => {
                    return Err(format!("'id' field of '{}' must be a string", self.name))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// Closed set of string literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            name: name.into(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.variants.iter().any(|v| v == literal)
    }
}

/// One schema file on disk holds exactly one declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "declaration", rename_all = "lowercase")]
pub enum Declaration {
    Entity(EntitySchema),
    Enum(EnumDef),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Entity(schema) => &schema.name,
            Declaration::Enum(def) => &def.name,
        }
    }
}

/// `postalCode` -> `Postal Code`, `id` -> `Id`
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        match prev {
            None => out.extend(c.to_uppercase()),
            Some(_) if c == '_' => {}
            Some(p) if p == '_' => {
                out.push(' ');
                out.extend(c.to_uppercase());
            }
            Some(p) if c.is_uppercase() && !p.is_uppercase() => {
                out.push(' ');
                out.push(c);
            }
            Some(_) => out.push(c),
        }
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> EntitySchema {
        EntitySchema::record("User")
            .field(FieldDef::required("name", FieldType::String))
            .field(FieldDef::optional("age", FieldType::int(IntWidth::U32)))
    }

    #[test]
    fn test_schema_structure_valid() {
        let schema = sample_schema();
        assert!(schema.validate_structure().is_ok());
    }

    #[test]
    fn test_record_declares_id_first() {
        let schema = sample_schema();
        assert_eq!(schema.fields[0].name, "id");
        assert!(schema.fields[0].required);
    }

    #[test]
    fn test_record_missing_id_field() {
        let mut schema = sample_schema();
        schema.fields.retain(|f| f.name != "id");
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_id_must_be_required() {
        let mut schema = sample_schema();
        schema.fields[0].required = false;
        let result = schema.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn test_value_object_needs_no_id() {
        let schema = EntitySchema::value_object("Address")
            .field(FieldDef::required("street", FieldType::String));
        assert!(schema.validate_structure().is_ok());
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::int(IntWidth::I8).type_name(), "int");
        assert_eq!(FieldType::Bool.type_name(), "bool");
        assert_eq!(FieldType::Float.type_name(), "float");
        assert_eq!(FieldType::object("Address").type_name(), "object");
        assert_eq!(FieldType::reference("User").type_name(), "string | object");
        assert_eq!(FieldType::array(FieldType::String).type_name(), "array");
    }

    #[test]
    fn test_array_target_is_element_target() {
        let ty = FieldType::array(FieldType::reference("Tag"));
        assert_eq!(ty.target(), Some(Target::Entity("Tag")));
    }

    #[test]
    fn test_int_width_bounds() {
        assert!(IntWidth::U8.contains(255));
        assert!(!IntWidth::U8.contains(256));
        assert!(!IntWidth::U32.contains(-1));
        assert!(IntWidth::I8.contains(-128));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("postalCode"), "Postal Code");
        assert_eq!(title_case("id"), "Id");
        assert_eq!(title_case("street"), "Street");
        assert_eq!(title_case("sha256Hash"), "Sha256 Hash");
    }

    #[test]
    fn test_field_def_json_shape() {
        let field = FieldDef::required("roles", FieldType::array(FieldType::enumeration("Role")));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["name"], "roles");
        assert_eq!(json["type"], "array");
        assert_eq!(json["element_type"]["type"], "enum");

        let back: FieldDef = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_format_survives_round_trip() {
        let field = FieldDef::required("createdAt", FieldType::String).format(Format::DateTime);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["format"], "date_time");

        let back: FieldDef = serde_json::from_value(json).unwrap();
        assert_eq!(back.format, Some(Format::DateTime));

        let plain = serde_json::to_value(FieldDef::required("note", FieldType::String)).unwrap();
        assert!(plain.get("format").is_none());
    }

    #[test]
    fn test_direct_enum_field_round_trip() {
        let field = FieldDef::required("status", FieldType::enumeration("OrderStatus"));
        let text = serde_json::to_string(&field).unwrap();
        assert_eq!(
            text,
            r#"{"name":"status","type":"enum","enum":"OrderStatus","required":true}"#
        );

        let back: FieldDef = serde_json::from_str(&text).unwrap();
        assert_eq!(back, field);
    }
}

//! Typed building blocks for catalog models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::{EntitySchema, EnumDef};

/// An optional field that keeps "omitted" apart from "explicitly null".
///
/// Model fields use it together with
/// `#[serde(default, skip_serializing_if = "Nullish::is_absent")]` so that an
/// absent key stays absent and a `null` stays `null` on re-encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Nullish<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Nullish<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullish::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullish::Null)
    }

    /// Present value, treating absent and null alike
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Nullish::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullish::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Nullish<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Nullish::Value(v),
            None => Nullish::Null,
        }
    }
}

impl<T: Serialize> Serialize for Nullish<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullish::Value(v) => serializer.serialize_some(v),
            Nullish::Null | Nullish::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullish<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullish::from)
    }
}

/// A link to another entity: its identifier or the entity itself, inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(String),
    Inline(Box<T>),
}

impl<T> Reference<T> {
    pub fn id(id: impl Into<String>) -> Self {
        Reference::Id(id.into())
    }

    pub fn inline(value: T) -> Self {
        Reference::Inline(Box::new(value))
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            Reference::Id(id) => Some(id),
            Reference::Inline(_) => None,
        }
    }
}

/// A typed model with a registered schema
pub trait Entity: Serialize + DeserializeOwned {
    /// Registry name
    const NAME: &'static str;

    /// Field declarations for this entity
    fn schema() -> EntitySchema;
}

/// A closed Rust enum whose wire form is the variant name
pub trait LiteralEnum: Serialize + DeserializeOwned {
    const NAME: &'static str;
    /// Variants in declaration order; the first is the default
    const VARIANTS: &'static [&'static str];

    fn enum_def() -> EnumDef {
        EnumDef::new(Self::NAME, Self::VARIANTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, skip_serializing_if = "Nullish::is_absent")]
        note: Nullish<String>,
    }

    #[test]
    fn test_nullish_keeps_absent_and_null_apart() {
        let absent: Probe = serde_json::from_value(json!({})).unwrap();
        assert!(absent.note.is_absent());
        assert_eq!(serde_json::to_value(&absent).unwrap(), json!({}));

        let null: Probe = serde_json::from_value(json!({"note": null})).unwrap();
        assert!(null.note.is_null());
        assert_eq!(serde_json::to_value(&null).unwrap(), json!({"note": null}));

        let value: Probe = serde_json::from_value(json!({"note": "hi"})).unwrap();
        assert_eq!(value.note.as_value().map(String::as_str), Some("hi"));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Target {
        id: String,
    }

    #[test]
    fn test_reference_accepts_id_or_inline() {
        let by_id: Reference<Target> = serde_json::from_value(json!("user:1")).unwrap();
        assert_eq!(by_id.as_id(), Some("user:1"));

        let inline: Reference<Target> = serde_json::from_value(json!({"id": "user:2"})).unwrap();
        assert_eq!(inline, Reference::inline(Target { id: "user:2".into() }));
    }
}

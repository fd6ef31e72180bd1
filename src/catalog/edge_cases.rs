//! Validation fixtures: optional strings with stacked rules, every integer
//! width, case normalizations, nested value objects.

use serde::{Deserialize, Serialize};

use crate::schema::{
    Entity, EntitySchema, FieldDef, FieldType, IntWidth, Nullish, Rule, SchemaRegistry,
    SchemaResult,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiValidatorOptionalString {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub username: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub email: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub website: Nullish<String>,
}

impl Entity for MultiValidatorOptionalString {
    const NAME: &'static str = "MultiValidatorOptionalString";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::optional("username", FieldType::String).rules([
                Rule::MinLength(5),
                Rule::MaxLength(100),
                Rule::StartsWith("usr_".into()),
            ]))
            .field(FieldDef::optional("email", FieldType::String).rules([Rule::Email, Rule::MaxLength(255)]))
            .field(FieldDef::optional("website", FieldType::String).rules([Rule::Url, Rule::MaxLength(2000)]))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllIntegerTypes {
    pub id: String,
    pub positive_u8: u8,
    pub positive_u16: u16,
    pub positive_u32: u32,
    pub positive_u64: u64,
    pub non_negative_usize: usize,
    pub positive_i8: i8,
    pub positive_i16: i16,
    pub positive_i32: i32,
    pub positive_i64: i64,
    pub non_negative_isize: isize,
}

impl Entity for AllIntegerTypes {
    const NAME: &'static str = "AllIntegerTypes";

    fn schema() -> EntitySchema {
        let positive = |name: &str, width| FieldDef::required(name, FieldType::int(width)).rule(Rule::Positive);
        let non_negative =
            |name: &str, width| FieldDef::required(name, FieldType::int(width)).rule(Rule::NonNegative);

        EntitySchema::record(Self::NAME)
            .field(positive("positiveU8", IntWidth::U8))
            .field(positive("positiveU16", IntWidth::U16))
            .field(positive("positiveU32", IntWidth::U32))
            .field(positive("positiveU64", IntWidth::U64))
            .field(non_negative("nonNegativeUsize", IntWidth::Usize))
            .field(positive("positiveI8", IntWidth::I8))
            .field(positive("positiveI16", IntWidth::I16))
            .field(positive("positiveI32", IntWidth::I32))
            .field(positive("positiveI64", IntWidth::I64))
            .field(non_negative("nonNegativeIsize", IntWidth::Isize))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalIntegerValidation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_positive_u32: Nullish<u32>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_non_negative_i32: Nullish<i32>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_positive_u64: Nullish<u64>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_negative_i64: Nullish<i64>,
}

impl Entity for OptionalIntegerValidation {
    const NAME: &'static str = "OptionalIntegerValidation";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::optional("optionalPositiveU32", FieldType::int(IntWidth::U32)).rule(Rule::Positive))
            .field(
                FieldDef::optional("optionalNonNegativeI32", FieldType::int(IntWidth::I32))
                    .rule(Rule::NonNegative),
            )
            .field(FieldDef::optional("optionalPositiveU64", FieldType::int(IntWidth::U64)).rule(Rule::Positive))
            .field(FieldDef::optional("optionalNegativeI64", FieldType::int(IntWidth::I64)).rule(Rule::Negative))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegerBounds {
    pub id: String,
    pub percentage: u32,
    pub above_zero: i32,
    pub under_thousand: u16,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_byte_value: Nullish<u32>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_bounded: Nullish<i32>,
}

impl Entity for IntegerBounds {
    const NAME: &'static str = "IntegerBounds";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("percentage", FieldType::int(IntWidth::U32)).rule(Rule::Between(1.0, 100.0)))
            .field(FieldDef::required("aboveZero", FieldType::int(IntWidth::I32)).rule(Rule::GreaterThan(0.0)))
            .field(FieldDef::required("underThousand", FieldType::int(IntWidth::U16)).rule(Rule::LessThan(1000.0)))
            .field(
                FieldDef::optional("optionalByteValue", FieldType::int(IntWidth::U32))
                    .rule(Rule::Between(0.0, 255.0)),
            )
            .field(
                FieldDef::optional("optionalBounded", FieldType::int(IntWidth::I32))
                    .rule(Rule::GreaterThanOrEqualTo(-100.0)),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexStringValidation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_uuid: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_ip: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_ipv4: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_digits: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_hex: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_alpha: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_alphanumeric: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_domain: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_with_at: Nullish<String>,
}

impl Entity for ComplexStringValidation {
    const NAME: &'static str = "ComplexStringValidation";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::optional("optionalUuid", FieldType::String).rule(Rule::Uuid))
            .field(FieldDef::optional("optionalIp", FieldType::String).rule(Rule::Ip))
            .field(FieldDef::optional("optionalIpv4", FieldType::String).rule(Rule::IpV4))
            .field(FieldDef::optional("optionalDigits", FieldType::String).rule(Rule::Digits))
            .field(FieldDef::optional("optionalHex", FieldType::String).rule(Rule::Hex))
            .field(FieldDef::optional("optionalAlpha", FieldType::String).rule(Rule::Alpha))
            .field(FieldDef::optional("optionalAlphanumeric", FieldType::String).rule(Rule::Alphanumeric))
            .field(FieldDef::optional("optionalDomain", FieldType::String).rule(Rule::EndsWith(".com".into())))
            .field(FieldDef::optional("optionalWithAt", FieldType::String).rule(Rule::Includes("@".into())))
    }
}

/// Each field carries one case rule; all but `optionalTrimmed` normalize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseValidation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_lowercase: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_uppercase: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_capitalized: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_uncapitalized: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_trimmed: Nullish<String>,
}

impl Entity for CaseValidation {
    const NAME: &'static str = "CaseValidation";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::optional("optionalLowercase", FieldType::String).rule(Rule::Lowercased))
            .field(FieldDef::optional("optionalUppercase", FieldType::String).rule(Rule::Uppercased))
            .field(FieldDef::optional("optionalCapitalized", FieldType::String).rule(Rule::Capitalized))
            .field(FieldDef::optional("optionalUncapitalized", FieldType::String).rule(Rule::Uncapitalized))
            .field(FieldDef::optional("optionalTrimmed", FieldType::String).rule(Rule::Trimmed))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerValidated {
    pub name: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_email: Nullish<String>,
}

impl Entity for InnerValidated {
    const NAME: &'static str = "InnerValidated";

    fn schema() -> EntitySchema {
        EntitySchema::value_object(Self::NAME)
            .field(
                FieldDef::required("name", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)]),
            )
            .field(FieldDef::required("count", FieldType::int(IntWidth::U32)).rule(Rule::Positive))
            .field(FieldDef::optional("optionalEmail", FieldType::String).rule(Rule::Email))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterWithNestedValidator {
    pub id: String,
    pub inner: InnerValidated,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_inner: Nullish<InnerValidated>,
    pub inner_list: Vec<InnerValidated>,
}

impl Entity for OuterWithNestedValidator {
    const NAME: &'static str = "OuterWithNestedValidator";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("inner", FieldType::object(InnerValidated::NAME)))
            .field(FieldDef::optional("optionalInner", FieldType::object(InnerValidated::NAME)))
            .field(FieldDef::required(
                "innerList",
                FieldType::array(FieldType::object(InnerValidated::NAME)),
            ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleNumberValidators {
    pub id: String,
    pub bounded_positive: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_byte: Nullish<u32>,
    pub percentage: f64,
}

impl Entity for MultipleNumberValidators {
    const NAME: &'static str = "MultipleNumberValidators";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(
                FieldDef::required("boundedPositive", FieldType::int(IntWidth::U32))
                    .rules([Rule::Positive, Rule::LessThan(100.0)]),
            )
            .field(
                FieldDef::optional("optionalByte", FieldType::int(IntWidth::U32))
                    .rules([Rule::NonNegative, Rule::LessThanOrEqualTo(255.0)]),
            )
            .field(
                FieldDef::required("percentage", FieldType::Float)
                    .rules([Rule::Positive, Rule::Between(0.01, 100.0)]),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonEmptyOptionString {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_non_empty: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_min_three: Nullish<String>,
}

impl Entity for NonEmptyOptionString {
    const NAME: &'static str = "NonEmptyOptionString";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::optional("optionalNonEmpty", FieldType::String).rule(Rule::NonEmpty))
            .field(
                FieldDef::optional("optionalMinThree", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MinLength(3)]),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatValidation {
    pub id: String,
    pub positive_float: f64,
    pub non_negative_float: f64,
    pub normalized: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_positive_float: Nullish<f64>,
}

impl Entity for FloatValidation {
    const NAME: &'static str = "FloatValidation";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("positiveFloat", FieldType::Float).rule(Rule::Positive))
            .field(FieldDef::required("nonNegativeFloat", FieldType::Float).rule(Rule::NonNegative))
            .field(FieldDef::required("normalized", FieldType::Float).rule(Rule::Between(0.0, 1.0)))
            .field(FieldDef::optional("optionalPositiveFloat", FieldType::Float).rule(Rule::Positive))
    }
}

pub fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register::<MultiValidatorOptionalString>()?;
    registry.register::<AllIntegerTypes>()?;
    registry.register::<OptionalIntegerValidation>()?;
    registry.register::<IntegerBounds>()?;
    registry.register::<ComplexStringValidation>()?;
    registry.register::<CaseValidation>()?;
    registry.register::<InnerValidated>()?;
    registry.register::<OuterWithNestedValidator>()?;
    registry.register::<MultipleNumberValidators>()?;
    registry.register::<NonEmptyOptionString>()?;
    registry.register::<FloatValidation>()?;
    Ok(())
}

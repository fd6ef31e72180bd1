//! Stress fixtures: stacked and redundant rules, every numeric width with
//! bounds, identifier and network formats, deep value-object nesting, and
//! arrays whose elements carry their own rules.

use serde::{Deserialize, Serialize};

use crate::schema::{
    Entity, EntitySchema, FieldDef, FieldType, Format, IntWidth, LiteralEnum, Nullish, Reference,
    Rule, SchemaRegistry, SchemaResult,
};

fn string(name: &str) -> FieldDef {
    FieldDef::required(name, FieldType::String)
}

fn opt_string(name: &str) -> FieldDef {
    FieldDef::optional(name, FieldType::String)
}

fn int(name: &str, width: IntWidth) -> FieldDef {
    FieldDef::required(name, FieldType::int(width))
}

fn opt_int(name: &str, width: IntWidth) -> FieldDef {
    FieldDef::optional(name, FieldType::int(width))
}

fn float(name: &str) -> FieldDef {
    FieldDef::required(name, FieldType::Float)
}

fn opt_float(name: &str) -> FieldDef {
    FieldDef::optional(name, FieldType::Float)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

impl LiteralEnum for PaymentStatus {
    const NAME: &'static str = "PaymentStatus";
    const VARIANTS: &'static [&'static str] =
        &["Pending", "Processing", "Completed", "Failed", "Refunded", "Cancelled"];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    BankTransfer,
    PayPal,
    Crypto,
    Cash,
}

impl LiteralEnum for PaymentMethod {
    const NAME: &'static str = "PaymentMethod";
    const VARIANTS: &'static [&'static str] =
        &["CreditCard", "DebitCard", "BankTransfer", "PayPal", "Crypto", "Cash"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenSinkString {
    pub id: String,
    pub strict_username: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_strict_username: Nullish<String>,
    pub validated_email: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_validated_email: Nullish<String>,
    pub api_endpoint: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_cdn_url: Nullish<String>,
}

impl Entity for KitchenSinkString {
    const NAME: &'static str = "KitchenSinkString";

    fn schema() -> EntitySchema {
        let strict = [
            Rule::Alphanumeric,
            Rule::Lowercased,
            Rule::MinLength(3),
            Rule::MaxLength(20),
            Rule::NonEmpty,
            Rule::Trimmed,
        ];

        EntitySchema::record(Self::NAME)
            .field(string("strictUsername").rules(strict.clone()))
            .field(opt_string("optionalStrictUsername").rules(strict))
            .field(
                string("validatedEmail")
                    .rules([
                        Rule::Email,
                        Rule::MaxLength(255),
                        Rule::Includes("@".into()),
                        Rule::NonEmpty,
                    ])
                    .format(Format::Email),
            )
            .field(
                opt_string("optionalValidatedEmail")
                    .rules([Rule::Email, Rule::MaxLength(255), Rule::NonEmpty])
                    .format(Format::Email),
            )
            .field(
                string("apiEndpoint")
                    .rules([
                        Rule::Url,
                        Rule::MaxLength(2000),
                        Rule::StartsWith("https://".into()),
                        Rule::NonEmpty,
                    ])
                    .format(Format::Url("api.example.com".into())),
            )
            .field(
                opt_string("optionalCdnUrl")
                    .rules([Rule::Url, Rule::MaxLength(500)])
                    .format(Format::Url("cdn.example.com".into())),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeIntegerValidation {
    pub id: String,
    pub constrained_u8: u8,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_constrained_u8: Nullish<u8>,
    pub bounded_u16: u16,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_bounded_u16: Nullish<u16>,
    pub percentage_u32: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_percentage_u32: Nullish<u32>,
    pub large_u64: u64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_large_u64: Nullish<u64>,
    pub negative_i8: i8,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_negative_i8: Nullish<i8>,
    pub non_positive_i16: i16,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_non_positive_i16: Nullish<i16>,
    pub bounded_i32: i32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_bounded_i32: Nullish<i32>,
    pub constrained_i64: i64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_non_negative_i64: Nullish<i64>,
    pub bounded_usize: usize,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_bounded_usize: Nullish<usize>,
    pub bounded_isize: isize,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_positive_isize: Nullish<isize>,
}

impl Entity for ExtremeIntegerValidation {
    const NAME: &'static str = "ExtremeIntegerValidation";

    fn schema() -> EntitySchema {
        use IntWidth::*;

        EntitySchema::record(Self::NAME)
            .field(int("constrainedU8", U8).rules([
                Rule::Positive,
                Rule::LessThanOrEqualTo(255.0),
                Rule::Between(1.0, 100.0),
            ]))
            .field(opt_int("optionalConstrainedU8", U8).rules([Rule::Positive, Rule::Between(1.0, 100.0)]))
            .field(int("boundedU16", U16).rules([
                Rule::NonNegative,
                Rule::LessThan(65000.0),
                Rule::GreaterThan(0.0),
            ]))
            .field(opt_int("optionalBoundedU16", U16).rules([Rule::NonNegative, Rule::LessThan(1000.0)]))
            .field(int("percentageU32", U32).rules([
                Rule::NonNegative,
                Rule::LessThanOrEqualTo(100.0),
                Rule::Between(0.0, 100.0),
            ]))
            .field(opt_int("optionalPercentageU32", U32).rule(Rule::Between(0.0, 100.0)))
            .field(int("largeU64", U64).rules([
                Rule::Positive,
                Rule::GreaterThanOrEqualTo(1.0),
                Rule::LessThan(1_000_000_000.0),
            ]))
            .field(opt_int("optionalLargeU64", U64).rule(Rule::Positive))
            .field(int("negativeI8", I8).rules([Rule::Negative, Rule::GreaterThan(-100.0)]))
            .field(opt_int("optionalNegativeI8", I8).rule(Rule::Negative))
            .field(
                int("nonPositiveI16", I16)
                    .rules([Rule::NonPositive, Rule::GreaterThanOrEqualTo(-1000.0)]),
            )
            .field(opt_int("optionalNonPositiveI16", I16).rule(Rule::NonPositive))
            .field(int("boundedI32", I32).rule(Rule::Between(-1000.0, 1000.0)))
            .field(opt_int("optionalBoundedI32", I32).rule(Rule::Between(-500.0, 500.0)))
            .field(
                int("constrainedI64", I64)
                    .rules([Rule::GreaterThan(-9_999_999.0), Rule::LessThan(9_999_999.0)]),
            )
            .field(opt_int("optionalNonNegativeI64", I64).rule(Rule::GreaterThanOrEqualTo(0.0)))
            .field(int("boundedUsize", Usize).rules([Rule::NonNegative, Rule::LessThan(10_000.0)]))
            .field(opt_int("optionalBoundedUsize", Usize).rule(Rule::NonNegative))
            .field(int("boundedIsize", Isize).rule(Rule::Between(-100.0, 100.0)))
            .field(opt_int("optionalPositiveIsize", Isize).rule(Rule::Positive))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeFloatValidation {
    pub id: String,
    pub multi_constrained_f32: f32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_f32: Nullish<f32>,
    pub normalized_f64: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_normalized_f64: Nullish<f64>,
    pub negative_f64: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_negative_f64: Nullish<f64>,
    pub currency_amount: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_currency: Nullish<f64>,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_percentage: Nullish<f64>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_latitude: Nullish<f64>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_longitude: Nullish<f64>,
}

impl Entity for ExtremeFloatValidation {
    const NAME: &'static str = "ExtremeFloatValidation";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(float("multiConstrainedF32").rules([
                Rule::Positive,
                Rule::Between(0.001, 999.999),
                Rule::LessThan(1000.0),
                Rule::GreaterThan(0.0),
            ]))
            .field(opt_float("optionalF32").rules([Rule::Positive, Rule::LessThan(100.0)]))
            .field(float("normalizedF64").rules([
                Rule::NonNegative,
                Rule::LessThanOrEqualTo(1.0),
                Rule::GreaterThanOrEqualTo(0.0),
            ]))
            .field(opt_float("optionalNormalizedF64").rule(Rule::Between(0.0, 1.0)))
            .field(float("negativeF64").rules([
                Rule::Negative,
                Rule::GreaterThan(-1000.0),
                Rule::LessThan(0.0),
            ]))
            .field(opt_float("optionalNegativeF64").rule(Rule::Negative))
            .field(
                float("currencyAmount")
                    .rules([Rule::NonNegative, Rule::LessThan(1_000_000.0)])
                    .format(Format::CurrencyAmount),
            )
            .field(
                opt_float("optionalCurrency")
                    .rule(Rule::Positive)
                    .format(Format::CurrencyAmount),
            )
            .field(float("percentage").rule(Rule::Between(0.0, 100.0)).format(Format::Percentage))
            .field(
                opt_float("optionalPercentage")
                    .rule(Rule::Between(0.0, 100.0))
                    .format(Format::Percentage),
            )
            .field(float("latitude").rule(Rule::Between(-90.0, 90.0)).format(Format::Latitude))
            .field(float("longitude").rule(Rule::Between(-180.0, 180.0)).format(Format::Longitude))
            .field(
                opt_float("optionalLatitude")
                    .rule(Rule::Between(-90.0, 90.0))
                    .format(Format::Latitude),
            )
            .field(
                opt_float("optionalLongitude")
                    .rule(Rule::Between(-180.0, 180.0))
                    .format(Format::Longitude),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexIdentifiers {
    pub id: String,
    pub uuid_field: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_uuid: Nullish<String>,
    pub hex_id_32: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_hex_id: Nullish<String>,
    pub base64_token: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_base64_token: Nullish<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_version: Nullish<String>,
    pub sha256_hash: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_hash: Nullish<String>,
}

impl Entity for ComplexIdentifiers {
    const NAME: &'static str = "ComplexIdentifiers";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(string("uuidField").rule(Rule::Uuid).format(Format::Uuid))
            .field(opt_string("optionalUuid").rule(Rule::Uuid).format(Format::Uuid))
            .field(
                string("hexId32")
                    .rules([Rule::Hex, Rule::MinLength(32), Rule::MaxLength(32)])
                    .format(Format::HexString(32)),
            )
            .field(
                opt_string("optionalHexId")
                    .rules([Rule::Hex, Rule::MinLength(16)])
                    .format(Format::HexString(16)),
            )
            .field(
                string("base64Token")
                    .rule(Rule::MaxLength(100))
                    .format(Format::Base64String(64)),
            )
            .field(
                opt_string("optionalBase64Token")
                    .rule(Rule::MaxLength(50))
                    .format(Format::Base64String(32)),
            )
            .field(
                string("version")
                    .rules([Rule::NonEmpty, Rule::MaxLength(20)])
                    .format(Format::Version),
            )
            .field(opt_string("optionalVersion").rule(Rule::MaxLength(20)).format(Format::Version))
            .field(
                string("sha256Hash")
                    .rules([Rule::Hex, Rule::MinLength(64), Rule::MaxLength(64)])
                    .format(Format::Hash),
            )
            .field(opt_string("optionalHash").rule(Rule::Hex).format(Format::Hash))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTypes {
    pub id: String,
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_ip: Nullish<String>,
    pub mac_address: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_mac: Nullish<String>,
    pub internal_api_url: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_storage_url: Nullish<String>,
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_user_agent: Nullish<String>,
}

impl Entity for NetworkTypes {
    const NAME: &'static str = "NetworkTypes";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(string("ipAddress").rule(Rule::Ip).format(Format::IpAddress))
            .field(opt_string("optionalIp").rule(Rule::Ip).format(Format::IpAddress))
            .field(string("macAddress").rule(Rule::MaxLength(17)).format(Format::MacAddress))
            .field(opt_string("optionalMac").rule(Rule::MaxLength(17)).format(Format::MacAddress))
            .field(
                string("internalApiUrl")
                    .rules([Rule::Url, Rule::StartsWith("https://".into())])
                    .format(Format::Url("api.internal.example.com".into())),
            )
            .field(
                opt_string("optionalStorageUrl")
                    .rule(Rule::Url)
                    .format(Format::Url("storage.example.com".into())),
            )
            .field(
                string("userAgent")
                    .rules([Rule::NonEmpty, Rule::MaxLength(500)])
                    .format(Format::UserAgent),
            )
            .field(
                opt_string("optionalUserAgent")
                    .rule(Rule::MaxLength(500))
                    .format(Format::UserAgent),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeExtremes {
    pub id: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_updated_at: Nullish<String>,
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_expiry_date: Nullish<String>,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_end_time: Nullish<String>,
    pub appointment: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_followup: Nullish<String>,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_duration: Nullish<String>,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_timezone: Nullish<String>,
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_target_date: Nullish<String>,
}

impl Entity for DateTimeExtremes {
    const NAME: &'static str = "DateTimeExtremes";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(string("createdAt").rule(Rule::NonEmpty).format(Format::DateTime))
            .field(opt_string("optionalUpdatedAt").format(Format::DateTime))
            .field(
                string("birthDate")
                    .rules([Rule::NonEmpty, Rule::MaxLength(10)])
                    .format(Format::Date),
            )
            .field(opt_string("optionalExpiryDate").rule(Rule::MaxLength(10)).format(Format::Date))
            .field(string("startTime").rule(Rule::NonEmpty).format(Format::Time))
            .field(opt_string("optionalEndTime").format(Format::Time))
            .field(string("appointment").rule(Rule::NonEmpty).format(Format::AppointmentDateTime))
            .field(opt_string("optionalFollowup").format(Format::AppointmentDateTime))
            .field(string("duration").rule(Rule::NonEmpty).format(Format::Iso8601DurationString))
            .field(opt_string("optionalDuration").format(Format::Iso8601DurationString))
            .field(string("timezone").rule(Rule::NonEmpty).format(Format::TimeZone))
            .field(opt_string("optionalTimezone").format(Format::TimeZone))
            .field(string("deadline").rule(Rule::NonEmpty).format(Format::DateWithinDays(30)))
            .field(opt_string("optionalTargetDate").format(Format::DateWithinDays(90)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoExtremes {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_nickname: Nullish<String>,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_mobile: Nullish<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_work_email: Nullish<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_street: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_city: Nullish<String>,
}

impl Entity for PersonalInfoExtremes {
    const NAME: &'static str = "PersonalInfoExtremes";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(
                string("firstName")
                    .rules([Rule::Alpha, Rule::NonEmpty, Rule::MaxLength(50)])
                    .format(Format::FirstName),
            )
            .field(
                string("lastName")
                    .rules([Rule::NonEmpty, Rule::MaxLength(50)])
                    .format(Format::LastName),
            )
            .field(
                string("fullName")
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)])
                    .format(Format::FullName),
            )
            .field(
                opt_string("optionalNickname")
                    .rule(Rule::MaxLength(50))
                    .format(Format::FirstName),
            )
            .field(
                string("phone")
                    .rules([Rule::NonEmpty, Rule::MaxLength(20)])
                    .format(Format::PhoneNumber),
            )
            .field(
                opt_string("optionalMobile")
                    .rule(Rule::MaxLength(20))
                    .format(Format::PhoneNumber),
            )
            .field(string("email").rules([Rule::Email, Rule::MaxLength(255)]).format(Format::Email))
            .field(opt_string("optionalWorkEmail").rule(Rule::Email).format(Format::Email))
            .field(
                string("street")
                    .rules([Rule::NonEmpty, Rule::MaxLength(200)])
                    .format(Format::StreetAddress),
            )
            .field(
                string("city")
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)])
                    .format(Format::City),
            )
            .field(
                string("state")
                    .rules([Rule::NonEmpty, Rule::MaxLength(50)])
                    .format(Format::State),
            )
            .field(
                string("postalCode")
                    .rules([Rule::NonEmpty, Rule::MaxLength(20)])
                    .format(Format::PostalCode),
            )
            .field(
                string("country")
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)])
                    .format(Format::Country),
            )
            .field(
                opt_string("optionalStreet")
                    .rule(Rule::MaxLength(200))
                    .format(Format::StreetAddress),
            )
            .field(opt_string("optionalCity").rule(Rule::MaxLength(100)).format(Format::City))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessExtremes {
    pub id: String,
    pub company_name: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_parent_company: Nullish<String>,
    pub product_name: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_variant_name: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_variant_sku: Nullish<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_discount: Nullish<f64>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_min_quantity: Nullish<u32>,
    pub test_card_number: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_backup_card: Nullish<String>,
}

impl Entity for BusinessExtremes {
    const NAME: &'static str = "BusinessExtremes";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(
                string("companyName")
                    .rules([Rule::NonEmpty, Rule::MaxLength(200)])
                    .format(Format::CompanyName),
            )
            .field(
                string("jobTitle")
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)])
                    .format(Format::JobTitle),
            )
            .field(
                opt_string("optionalParentCompany")
                    .rule(Rule::MaxLength(200))
                    .format(Format::CompanyName),
            )
            .field(
                string("productName")
                    .rules([Rule::NonEmpty, Rule::MaxLength(200)])
                    .format(Format::ProductName),
            )
            .field(
                string("sku")
                    .rules([Rule::Alphanumeric, Rule::MinLength(6), Rule::MaxLength(20)])
                    .format(Format::ProductSku),
            )
            .field(
                opt_string("optionalVariantName")
                    .rule(Rule::MaxLength(200))
                    .format(Format::ProductName),
            )
            .field(
                opt_string("optionalVariantSku")
                    .rule(Rule::MaxLength(20))
                    .format(Format::ProductSku),
            )
            .field(
                float("price")
                    .rules([Rule::Positive, Rule::LessThan(100_000.0)])
                    .format(Format::CurrencyAmount),
            )
            .field(
                opt_float("optionalDiscount")
                    .rule(Rule::NonNegative)
                    .format(Format::CurrencyAmount),
            )
            .field(int("quantity", IntWidth::U32).rules([Rule::NonNegative, Rule::LessThan(10_000.0)]))
            .field(opt_int("optionalMinQuantity", IntWidth::U32).rule(Rule::Positive))
            .field(
                string("testCardNumber")
                    .rules([Rule::Digits, Rule::MinLength(13), Rule::MaxLength(19)])
                    .format(Format::CreditCardNumber),
            )
            .field(
                opt_string("optionalBackupCard")
                    .rule(Rule::Digits)
                    .format(Format::CreditCardNumber),
            )
    }
}

/// Address with coded state and country; both normalize to uppercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAddress {
    pub street: String,
    pub city: String,
    pub state_code: String,
    pub postal_code: String,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub latitude: Nullish<f64>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub longitude: Nullish<f64>,
}

impl Entity for ValidatedAddress {
    const NAME: &'static str = "ValidatedAddress";

    fn schema() -> EntitySchema {
        EntitySchema::value_object(Self::NAME)
            .field(string("street").rules([Rule::NonEmpty, Rule::MaxLength(200)]))
            .field(string("city").rules([Rule::NonEmpty, Rule::MaxLength(100)]))
            .field(string("stateCode").rules([Rule::Uppercased, Rule::MinLength(2), Rule::MaxLength(3)]))
            .field(string("postalCode").rules([Rule::NonEmpty, Rule::MaxLength(20)]))
            .field(string("countryCode").rules([Rule::Uppercased, Rule::MinLength(2), Rule::MaxLength(2)]))
            .field(opt_float("latitude").rule(Rule::Between(-90.0, 90.0)))
            .field(opt_float("longitude").rule(Rule::Between(-180.0, 180.0)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedContact {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub phone: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub title: Nullish<String>,
}

impl Entity for ValidatedContact {
    const NAME: &'static str = "ValidatedContact";

    fn schema() -> EntitySchema {
        EntitySchema::value_object(Self::NAME)
            .field(
                string("name")
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)])
                    .format(Format::FullName),
            )
            .field(string("email").rule(Rule::Email).format(Format::Email))
            .field(opt_string("phone").rule(Rule::MaxLength(20)).format(Format::PhoneNumber))
            .field(opt_string("title").rule(Rule::MaxLength(100)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepNestedValidation {
    pub id: String,
    pub name: String,
    pub primary_address: ValidatedAddress,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub billing_address: Nullish<ValidatedAddress>,
    pub shipping_addresses: Vec<ValidatedAddress>,
    pub primary_contact: ValidatedContact,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub secondary_contact: Nullish<ValidatedContact>,
    pub additional_contacts: Vec<ValidatedContact>,
    pub total_orders: u32,
    pub total_spent: f64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub credit_limit: Nullish<f64>,
}

impl Entity for DeepNestedValidation {
    const NAME: &'static str = "DeepNestedValidation";

    fn schema() -> EntitySchema {
        let address = || FieldType::object(ValidatedAddress::NAME);
        let contact = || FieldType::object(ValidatedContact::NAME);

        EntitySchema::record(Self::NAME)
            .field(string("name").rules([Rule::NonEmpty, Rule::MaxLength(200)]))
            .field(FieldDef::required("primaryAddress", address()))
            .field(FieldDef::optional("billingAddress", address()))
            .field(FieldDef::required("shippingAddresses", FieldType::array(address())))
            .field(FieldDef::required("primaryContact", contact()))
            .field(FieldDef::optional("secondaryContact", contact()))
            .field(FieldDef::required("additionalContacts", FieldType::array(contact())))
            .field(int("totalOrders", IntWidth::U32).rule(Rule::NonNegative))
            .field(float("totalSpent").rule(Rule::NonNegative))
            .field(opt_float("creditLimit").rule(Rule::Positive))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCaseUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: String,
    pub login_count: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub rating: Nullish<f64>,
}

impl Entity for EdgeCaseUser {
    const NAME: &'static str = "EdgeCaseUser";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(string("email").rules([Rule::Email, Rule::MaxLength(255)]).format(Format::Email))
            .field(string("username").rules([Rule::Alphanumeric, Rule::MinLength(3), Rule::MaxLength(30)]))
            .field(string("createdAt").format(Format::DateTime))
            .field(int("loginCount", IntWidth::U32).rule(Rule::NonNegative))
            .field(opt_float("rating").rule(Rule::Between(0.0, 5.0)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCasePost {
    pub id: String,
    pub author: Reference<EdgeCaseUser>,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub updated_at: Nullish<String>,
    pub view_count: u64,
    pub like_count: u32,
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub featured_image: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub meta_description: Nullish<String>,
}

impl Entity for EdgeCasePost {
    const NAME: &'static str = "EdgeCasePost";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("author", FieldType::reference(EdgeCaseUser::NAME)))
            .field(string("title").rules([Rule::NonEmpty, Rule::MinLength(5), Rule::MaxLength(200)]))
            .field(string("content").rules([Rule::NonEmpty, Rule::MinLength(10)]))
            .field(string("slug").rules([Rule::Lowercased, Rule::MaxLength(100)]))
            .field(string("createdAt").format(Format::DateTime))
            .field(opt_string("updatedAt").format(Format::DateTime))
            .field(int("viewCount", IntWidth::U64).rule(Rule::NonNegative))
            .field(int("likeCount", IntWidth::U32).rule(Rule::NonNegative))
            .field(FieldDef::required("isPublished", FieldType::Bool))
            .field(
                opt_string("featuredImage")
                    .rule(Rule::Url)
                    .format(Format::Url("images.example.com".into())),
            )
            .field(opt_string("metaDescription").rule(Rule::MaxLength(300)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCaseComment {
    pub id: String,
    pub post: Reference<EdgeCasePost>,
    pub author: Reference<EdgeCaseUser>,
    pub content: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub edited_at: Nullish<String>,
    pub like_count: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub parent_comment_id: Nullish<String>,
    pub is_approved: bool,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub author_ip: Nullish<String>,
}

impl Entity for EdgeCaseComment {
    const NAME: &'static str = "EdgeCaseComment";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("post", FieldType::reference(EdgeCasePost::NAME)))
            .field(FieldDef::required("author", FieldType::reference(EdgeCaseUser::NAME)))
            .field(string("content").rules([Rule::NonEmpty, Rule::MinLength(1), Rule::MaxLength(10_000)]))
            .field(string("createdAt").format(Format::DateTime))
            .field(opt_string("editedAt").format(Format::DateTime))
            .field(int("likeCount", IntWidth::U32).rule(Rule::NonNegative))
            .field(opt_string("parentCommentId"))
            .field(FieldDef::required("isApproved", FieldType::Bool))
            .field(opt_string("authorIp").rule(Rule::Ip))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPayment {
    pub id: String,
    pub user: Reference<EdgeCaseUser>,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub amount: f64,
    /// ISO 4217, normalized to uppercase
    pub currency: String,
    pub fee: f64,
    pub tax: f64,
    pub total: f64,
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub reference_code: Nullish<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub processed_at: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub completed_at: Nullish<String>,
    pub billing_address: ValidatedAddress,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub notes: Nullish<String>,
    pub retry_count: u8,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub failure_reason: Nullish<String>,
}

impl Entity for ComplexPayment {
    const NAME: &'static str = "ComplexPayment";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("user", FieldType::reference(EdgeCaseUser::NAME)))
            .field(FieldDef::required("status", FieldType::enumeration(PaymentStatus::NAME)))
            .field(FieldDef::required("method", FieldType::enumeration(PaymentMethod::NAME)))
            .field(
                float("amount")
                    .rules([Rule::Positive, Rule::LessThan(1_000_000.0)])
                    .format(Format::CurrencyAmount),
            )
            .field(string("currency").rules([Rule::Uppercased, Rule::MinLength(3), Rule::MaxLength(3)]))
            .field(float("fee").rule(Rule::NonNegative).format(Format::CurrencyAmount))
            .field(float("tax").rule(Rule::NonNegative).format(Format::CurrencyAmount))
            .field(float("total").rule(Rule::Positive).format(Format::CurrencyAmount))
            .field(
                string("transactionId")
                    .rules([Rule::Hex, Rule::MinLength(32)])
                    .format(Format::HexString(32)),
            )
            .field(opt_string("referenceCode").rule(Rule::Hex).format(Format::HexString(16)))
            .field(string("createdAt").format(Format::DateTime))
            .field(opt_string("processedAt").format(Format::DateTime))
            .field(opt_string("completedAt").format(Format::DateTime))
            .field(FieldDef::required("billingAddress", FieldType::object(ValidatedAddress::NAME)))
            .field(opt_string("notes").rule(Rule::MaxLength(1000)))
            .field(int("retryCount", IntWidth::U8).rule(Rule::NonNegative))
            .field(opt_string("failureReason").rule(Rule::MaxLength(500)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxValidatorStacking {
    pub id: String,
    pub mega_validated_string: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_mega_validated: Nullish<String>,
    pub mega_validated_number: f64,
    pub mega_validated_u32: u32,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_mega_u32: Nullish<u32>,
    pub mega_validated_i64: i64,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_mega_i64: Nullish<i64>,
}

impl Entity for MaxValidatorStacking {
    const NAME: &'static str = "MaxValidatorStacking";

    fn schema() -> EntitySchema {
        let mega = [
            Rule::NonEmpty,
            Rule::Trimmed,
            Rule::MinLength(8),
            Rule::MaxLength(128),
            Rule::Alphanumeric,
        ];

        EntitySchema::record(Self::NAME)
            .field(string("megaValidatedString").rules(mega.clone()))
            .field(opt_string("optionalMegaValidated").rules(mega))
            .field(float("megaValidatedNumber").rules([
                Rule::Positive,
                Rule::GreaterThan(0.0),
                Rule::GreaterThanOrEqualTo(1.0),
                Rule::LessThan(1000.0),
                Rule::LessThanOrEqualTo(999.0),
                Rule::Between(1.0, 999.0),
            ]))
            .field(int("megaValidatedU32", IntWidth::U32).rules([
                Rule::Positive,
                Rule::GreaterThanOrEqualTo(1.0),
                Rule::LessThanOrEqualTo(100.0),
                Rule::Between(1.0, 100.0),
            ]))
            .field(opt_int("optionalMegaU32", IntWidth::U32).rules([Rule::Positive, Rule::Between(1.0, 100.0)]))
            .field(int("megaValidatedI64", IntWidth::I64).rules([
                Rule::GreaterThan(-1_000_000.0),
                Rule::LessThan(1_000_000.0),
                Rule::Between(-999_999.0, 999_999.0),
            ]))
            .field(opt_int("optionalMegaI64", IntWidth::I64).rule(Rule::Between(-1000.0, 1000.0)))
    }
}

/// String and number rules on array fields apply to every element; item
/// count rules apply to the array itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayValidationExtremes {
    pub id: String,
    pub tags: Vec<String>,
    pub validated_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_tags: Nullish<Vec<String>>,
    pub scores: Vec<u32>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub optional_scores: Nullish<Vec<u32>>,
    pub measurements: Vec<f64>,
    pub addresses: Vec<ValidatedAddress>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub backup_addresses: Nullish<Vec<ValidatedAddress>>,
}

impl Entity for ArrayValidationExtremes {
    const NAME: &'static str = "ArrayValidationExtremes";

    fn schema() -> EntitySchema {
        let strings = || FieldType::array(FieldType::String);
        let scores = || FieldType::array(FieldType::int(IntWidth::U32));
        let addresses = || FieldType::array(FieldType::object(ValidatedAddress::NAME));

        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("tags", strings()).rules([
                Rule::NonEmpty,
                Rule::MaxLength(50),
                Rule::MaxItems(20),
            ]))
            .field(FieldDef::required("validatedEmails", strings()).rule(Rule::Email))
            .field(FieldDef::optional("optionalTags", strings()))
            .field(FieldDef::required("scores", scores()).rule(Rule::MaxItems(100)))
            .field(FieldDef::optional("optionalScores", scores()))
            .field(FieldDef::required("measurements", FieldType::array(FieldType::Float)))
            .field(FieldDef::required("addresses", addresses()))
            .field(FieldDef::optional("backupAddresses", addresses()))
    }
}

pub fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register_literal_enum::<PaymentStatus>()?;
    registry.register_literal_enum::<PaymentMethod>()?;
    registry.register::<KitchenSinkString>()?;
    registry.register::<ExtremeIntegerValidation>()?;
    registry.register::<ExtremeFloatValidation>()?;
    registry.register::<ComplexIdentifiers>()?;
    registry.register::<NetworkTypes>()?;
    registry.register::<DateTimeExtremes>()?;
    registry.register::<PersonalInfoExtremes>()?;
    registry.register::<BusinessExtremes>()?;
    registry.register::<ValidatedAddress>()?;
    registry.register::<ValidatedContact>()?;
    registry.register::<DeepNestedValidation>()?;
    registry.register::<EdgeCaseUser>()?;
    registry.register::<EdgeCasePost>()?;
    registry.register::<EdgeCaseComment>()?;
    registry.register::<ComplexPayment>()?;
    registry.register::<MaxValidatorStacking>()?;
    registry.register::<ArrayValidationExtremes>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use serde_json::json;

    fn address() -> serde_json::Value {
        json!({
            "street": "123 Main St",
            "city": "New York",
            "stateCode": "ny",
            "postalCode": "10001",
            "countryCode": "us",
            "latitude": 40.7128,
            "longitude": -74.006
        })
    }

    #[test]
    fn test_kitchen_sink_username_normalizes_then_checks() {
        let registry = builtin().unwrap();
        let mut value = registry.default_value(KitchenSinkString::NAME).unwrap();
        value["strictUsername"] = json!("ValidUser123");

        let decoded: KitchenSinkString = registry.decode(&value).unwrap();
        assert_eq!(decoded.strict_username, "validuser123");

        value["strictUsername"] = json!(" user ");
        let err = registry.validate(KitchenSinkString::NAME, &value).unwrap_err();
        assert_eq!(err.issues()[0].rule(), Some("alphanumeric"));
    }

    #[test]
    fn test_api_endpoint_requires_https_prefix() {
        let registry = builtin().unwrap();
        let mut value = registry.default_value(KitchenSinkString::NAME).unwrap();
        value["apiEndpoint"] = json!("http://api.example.com/v1");

        let err = registry.validate(KitchenSinkString::NAME, &value).unwrap_err();
        assert_eq!(err.issues()[0].path, "apiEndpoint");
        assert_eq!(err.issues()[0].rule(), Some("starts_with"));
    }

    #[test]
    fn test_integer_redundant_bounds() {
        let registry = builtin().unwrap();
        let mut value = registry.default_value(ExtremeIntegerValidation::NAME).unwrap();
        assert_eq!(value["constrainedU8"], json!(1));
        assert_eq!(value["negativeI8"], json!(-1));

        value["constrainedU8"] = json!(101);
        value["negativeI8"] = json!(-100);
        let err = registry.validate(ExtremeIntegerValidation::NAME, &value).unwrap_err();
        let rules: Vec<_> = err.issues().iter().map(|i| i.rule()).collect();
        assert_eq!(rules, vec![Some("between"), Some("greater_than")]);
    }

    #[test]
    fn test_identifier_formats() {
        let registry = builtin().unwrap();
        let value = json!({
            "id": "ids:1",
            "uuidField": "550e8400-e29b-41d4-a716-446655440000",
            "hexId32": "0123456789abcdef0123456789abcdef",
            "optionalHexId": "0123",
            "base64Token": "dGVzdCB0b2tlbiB2YWx1ZQ==",
            "version": "1.2.3",
            "sha256Hash": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        });

        let err = registry.validate(ComplexIdentifiers::NAME, &value).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].path, "optionalHexId");
        assert_eq!(err.issues()[0].rule(), Some("min_length"));
    }

    #[test]
    fn test_deep_nested_addresses_normalize() {
        let registry = builtin().unwrap();
        let mut value = registry.default_value(DeepNestedValidation::NAME).unwrap();
        value["primaryAddress"] = address();
        value["shippingAddresses"] = json!([address(), address()]);

        let decoded: DeepNestedValidation = registry.decode(&value).unwrap();
        assert_eq!(decoded.primary_address.state_code, "NY");
        assert_eq!(decoded.shipping_addresses[1].country_code, "US");

        value["shippingAddresses"][1]["latitude"] = json!(91.0);
        let err = registry.validate(DeepNestedValidation::NAME, &value).unwrap_err();
        assert_eq!(err.issues()[0].path, "shippingAddresses[1].latitude");
    }

    #[test]
    fn test_payment_enums_and_currency() {
        let registry = builtin().unwrap();
        let mut value = registry.default_value(ComplexPayment::NAME).unwrap();
        value["status"] = json!("Completed");
        value["method"] = json!("PayPal");
        value["currency"] = json!("usd");

        let decoded: ComplexPayment = registry.decode(&value).unwrap();
        assert_eq!(decoded.status, PaymentStatus::Completed);
        assert_eq!(decoded.method, PaymentMethod::PayPal);
        assert_eq!(decoded.currency, "USD");
        assert_eq!(decoded.user.as_id(), Some("edge_case_user:default"));
    }

    #[test]
    fn test_array_element_rules() {
        let registry = builtin().unwrap();
        let mut value = registry.default_value(ArrayValidationExtremes::NAME).unwrap();
        value["tags"] = json!(["rust", ""]);
        value["validatedEmails"] = json!(["a@b.com", "nope"]);
        value["scores"] = json!((0..101).collect::<Vec<u32>>());

        let err = registry.validate(ArrayValidationExtremes::NAME, &value).unwrap_err();
        let found: Vec<_> = err.issues().iter().map(|i| (i.path.as_str(), i.rule())).collect();
        assert_eq!(
            found,
            vec![
                ("tags[1]", Some("non_empty")),
                ("validatedEmails[1]", Some("email")),
                ("scores", Some("max_items")),
            ]
        );
    }

    #[test]
    fn test_max_stacking_defaults_validate() {
        let registry = builtin().unwrap();
        let value = registry.default_value(MaxValidatorStacking::NAME).unwrap();
        assert_eq!(value["megaValidatedNumber"], json!(1.0));
        assert_eq!(value["megaValidatedU32"], json!(1));

        let decoded: MaxValidatorStacking = registry.default_instance().unwrap();
        assert_eq!(decoded.mega_validated_string.len(), 8);
    }
}

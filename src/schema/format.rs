//! Field formats
//!
//! A format names what a field holds (a timestamp, a phone number, a product
//! SKU) beyond its JSON type. Formats are declaration metadata: they are not
//! checked during validation, they travel with exported schemas, and they
//! seed the canonical default of string fields.
//!
//! Seeds are fixed sample values, so defaults stay deterministic.

use serde::{Deserialize, Serialize};

use super::types::FieldType;

const HEX_DIGITS: &str = "0123456789abcdef";
const BASE64_DIGITS: &str = "QUJDREVGR0hJSktMTU5PUA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Uuid,
    DateTime,
    Date,
    Time,
    /// Hex digits, exactly this many
    HexString(usize),
    /// Base64 alphabet, exactly this many characters
    Base64String(usize),
    JwtToken,
    CreditCardNumber,
    SocialSecurityNumber,
    IpAddress,
    MacAddress,
    ColorHex,
    /// File name with this extension
    Filename(String),
    /// HTTPS URL on this domain
    Url(String),
    CurrencyAmount,
    Percentage,
    Latitude,
    Longitude,
    CompanyName,
    JobTitle,
    StreetAddress,
    City,
    State,
    PostalCode,
    Country,
    /// Placeholder text of this many words
    LoremIpsum(usize),
    ProductName,
    ProductSku,
    Version,
    Hash,
    UserAgent,
    Email,
    FirstName,
    LastName,
    FullName,
    PhoneNumber,
    Iso8601DurationString,
    TimeZone,
    /// Timestamp within this many days
    DateWithinDays(i64),
    AppointmentDateTime,
}

impl Format {
    /// Amounts and coordinates, which may be declared on numeric fields.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Format::CurrencyAmount | Format::Percentage | Format::Latitude | Format::Longitude
        )
    }

    /// Whether the format makes sense on a field of scalar type `ty`.
    pub fn applies_to(&self, ty: &FieldType) -> bool {
        match ty {
            FieldType::String => true,
            FieldType::Int { .. } | FieldType::Float => self.is_numeric(),
            FieldType::Array { element_type } => self.applies_to(element_type),
            _ => false,
        }
    }

    /// Sample string value for this format.
    pub fn seed(&self) -> String {
        match self {
            Format::Uuid => "123e4567-e89b-12d3-a456-426614174000".into(),
            Format::DateTime => "2024-01-01T00:00:00Z".into(),
            Format::Date => "2024-01-01".into(),
            Format::Time => "09:00:00".into(),
            Format::HexString(len) => cycle(HEX_DIGITS, *len),
            Format::Base64String(len) => cycle(BASE64_DIGITS, *len),
            Format::JwtToken => format!(
                "{}.{}.{}",
                cycle(BASE64_DIGITS, 36),
                cycle(BASE64_DIGITS, 36),
                cycle(BASE64_DIGITS, 43)
            ),
            Format::CreditCardNumber => "4242-4242-4242-4242".into(),
            Format::SocialSecurityNumber => "123-45-6789".into(),
            Format::IpAddress => "192.168.0.1".into(),
            Format::MacAddress => "00:1a:2b:3c:4d:5e".into(),
            Format::ColorHex => "#3b82f6".into(),
            Format::Filename(ext) => format!("document.{}", ext),
            Format::Url(domain) => format!("https://{}/resource", domain),
            Format::CurrencyAmount => "$0.00".into(),
            Format::Percentage => "0%".into(),
            Format::Latitude | Format::Longitude => "0.000000".into(),
            Format::CompanyName => "Stripe Inc".into(),
            Format::JobTitle => "Software Engineer".into(),
            Format::StreetAddress => "1 Main Street".into(),
            Format::City => "Austin".into(),
            Format::State => "TX".into(),
            Format::PostalCode => "10001".into(),
            Format::Country => "United States".into(),
            Format::LoremIpsum(words) => lorem(*words),
            Format::ProductName => "Premium Widget".into(),
            Format::ProductSku => "ABC-1234".into(),
            Format::Version => "1.0.0".into(),
            Format::Hash => cycle(HEX_DIGITS, 64),
            Format::UserAgent => "Mozilla/5.0 (X11; Linux x86_64)".into(),
            Format::Email => "jonathan@company.com".into(),
            Format::FirstName => "Mary".into(),
            Format::LastName => "Smith".into(),
            Format::FullName => "Mary Smith".into(),
            Format::PhoneNumber => "555-555-0100".into(),
            Format::Iso8601DurationString => "PT1H".into(),
            Format::TimeZone => "America/New_York".into(),
            Format::DateWithinDays(_) | Format::AppointmentDateTime => {
                "2024-01-01T09:00:00Z".into()
            }
        }
    }
}

fn cycle(alphabet: &str, len: usize) -> String {
    alphabet.chars().cycle().take(len).collect()
}

fn lorem(words: usize) -> String {
    const WORDS: [&str; 8] = [
        "lorem",
        "ipsum",
        "dolor",
        "sit",
        "amet",
        "consectetur",
        "adipiscing",
        "elit",
    ];
    WORDS
        .iter()
        .cycle()
        .take(words.max(1))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

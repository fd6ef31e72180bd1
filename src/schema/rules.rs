//! Field constraint rules
//!
//! A rule is either a check (pass/fail) or a normalization. Normalizations
//! (`lowercased`, `uppercased`, `capitalized`, `uncapitalized`) rewrite the
//! value and never fail; rules declared after them see the rewritten value.
//!
//! String lengths are counted in Unicode scalar values.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

/// Tolerance used by `multiple_of` on fractional divisors
const MULTIPLE_EPSILON: f64 = 1e-9;

/// Which JSON value a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    String,
    Number,
    Array,
}

/// Regular expression argument of the `pattern` rule. Compiled once, on
/// first use, and shared by clones made afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Pattern {
    source: String,
    compiled: OnceLock<Result<Regex, regex::Error>>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceLock::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled
            .get_or_init(|| Regex::new(&self.source))
            .as_ref()
    }

    /// An invalid expression matches nothing.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex().map_or(false, |re| re.is_match(value))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

/// Constraint attached to a field, applied in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "arg", rename_all = "snake_case")]
pub enum Rule {
    // String checks
    NonEmpty,
    MinLength(usize),
    MaxLength(usize),
    Length(usize),
    StartsWith(String),
    EndsWith(String),
    Includes(String),
    Trimmed,
    Alpha,
    Alphanumeric,
    Digits,
    Hex,
    Email,
    Url,
    Uuid,
    Ip,
    IpV4,
    IpV6,
    Pattern(Pattern),

    // String normalizations
    Lowercased,
    Uppercased,
    Capitalized,
    Uncapitalized,

    // Number checks
    Positive,
    NonNegative,
    Negative,
    NonPositive,
    GreaterThan(f64),
    GreaterThanOrEqualTo(f64),
    LessThan(f64),
    LessThanOrEqualTo(f64),
    /// Inclusive on both ends
    Between(f64, f64),
    MultipleOf(f64),
    Finite,

    // Array checks
    MinItems(usize),
    MaxItems(usize),
    ItemsCount(usize),
}

impl Rule {
    /// Stable snake_case name; also the key for custom messages.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::NonEmpty => "non_empty",
            Rule::MinLength(_) => "min_length",
            Rule::MaxLength(_) => "max_length",
            Rule::Length(_) => "length",
            Rule::StartsWith(_) => "starts_with",
            Rule::EndsWith(_) => "ends_with",
            Rule::Includes(_) => "includes",
            Rule::Trimmed => "trimmed",
            Rule::Alpha => "alpha",
            Rule::Alphanumeric => "alphanumeric",
            Rule::Digits => "digits",
            Rule::Hex => "hex",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Uuid => "uuid",
            Rule::Ip => "ip",
            Rule::IpV4 => "ip_v4",
            Rule::IpV6 => "ip_v6",
            Rule::Pattern(_) => "pattern",
            Rule::Lowercased => "lowercased",
            Rule::Uppercased => "uppercased",
            Rule::Capitalized => "capitalized",
            Rule::Uncapitalized => "uncapitalized",
            Rule::Positive => "positive",
            Rule::NonNegative => "non_negative",
            Rule::Negative => "negative",
            Rule::NonPositive => "non_positive",
            Rule::GreaterThan(_) => "greater_than",
            Rule::GreaterThanOrEqualTo(_) => "greater_than_or_equal_to",
            Rule::LessThan(_) => "less_than",
            Rule::LessThanOrEqualTo(_) => "less_than_or_equal_to",
            Rule::Between(_, _) => "between",
            Rule::MultipleOf(_) => "multiple_of",
            Rule::Finite => "finite",
            Rule::MinItems(_) => "min_items",
            Rule::MaxItems(_) => "max_items",
            Rule::ItemsCount(_) => "items_count",
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Positive
            | Rule::NonNegative
            | Rule::Negative
            | Rule::NonPositive
            | Rule::GreaterThan(_)
            | Rule::GreaterThanOrEqualTo(_)
            | Rule::LessThan(_)
            | Rule::LessThanOrEqualTo(_)
            | Rule::Between(_, _)
            | Rule::MultipleOf(_)
            | Rule::Finite => RuleKind::Number,
            Rule::MinItems(_) | Rule::MaxItems(_) | Rule::ItemsCount(_) => RuleKind::Array,
            _ => RuleKind::String,
        }
    }

    pub fn is_normalization(&self) -> bool {
        matches!(
            self,
            Rule::Lowercased | Rule::Uppercased | Rule::Capitalized | Rule::Uncapitalized
        )
    }

    /// Rewrites `value` for normalization rules. Returns `None` for checks.
    pub fn normalize(&self, value: &str) -> Option<String> {
        match self {
            Rule::Lowercased => Some(value.to_lowercase()),
            Rule::Uppercased => Some(value.to_uppercase()),
            Rule::Capitalized => Some(map_first_char(value, |c| c.to_uppercase().collect())),
            Rule::Uncapitalized => Some(map_first_char(value, |c| c.to_lowercase().collect())),
            _ => None,
        }
    }

    /// Evaluates a string check. Normalizations and non-string rules pass.
    pub fn check_str(&self, value: &str) -> bool {
        let len = value.chars().count();
        match self {
            Rule::NonEmpty => len > 0,
            Rule::MinLength(min) => len >= *min,
            Rule::MaxLength(max) => len <= *max,
            Rule::Length(exact) => len == *exact,
            Rule::StartsWith(prefix) => value.starts_with(prefix.as_str()),
            Rule::EndsWith(suffix) => value.ends_with(suffix.as_str()),
            Rule::Includes(needle) => value.contains(needle.as_str()),
            Rule::Trimmed => value == value.trim(),
            Rule::Alpha => value.chars().all(char::is_alphabetic),
            Rule::Alphanumeric => value.chars().all(char::is_alphanumeric),
            Rule::Digits => value.chars().all(|c| c.is_ascii_digit()),
            Rule::Hex => value.chars().all(|c| c.is_ascii_hexdigit()),
            Rule::Email => is_email(value),
            Rule::Url => url::Url::parse(value).is_ok(),
            Rule::Uuid => uuid::Uuid::parse_str(value).is_ok(),
            Rule::Ip => value.parse::<IpAddr>().is_ok(),
            Rule::IpV4 => value.parse::<Ipv4Addr>().is_ok(),
            Rule::IpV6 => value.parse::<Ipv6Addr>().is_ok(),
            Rule::Pattern(pattern) => pattern.is_match(value),
            _ => true,
        }
    }

    /// Evaluates a numeric check. Non-numeric rules pass.
    pub fn check_number(&self, value: f64) -> bool {
        match self {
            Rule::Positive => value > 0.0,
            Rule::NonNegative => value >= 0.0,
            Rule::Negative => value < 0.0,
            Rule::NonPositive => value <= 0.0,
            Rule::GreaterThan(min) => value > *min,
            Rule::GreaterThanOrEqualTo(min) => value >= *min,
            Rule::LessThan(max) => value < *max,
            Rule::LessThanOrEqualTo(max) => value <= *max,
            Rule::Between(lo, hi) => value >= *lo && value <= *hi,
            Rule::MultipleOf(step) => is_multiple_of(value, *step),
            Rule::Finite => value.is_finite(),
            _ => true,
        }
    }

    /// Evaluates an array item-count check. Other rules pass.
    pub fn check_items(&self, count: usize) -> bool {
        match self {
            Rule::MinItems(min) => count >= *min,
            Rule::MaxItems(max) => count <= *max,
            Rule::ItemsCount(exact) => count == *exact,
            _ => true,
        }
    }

    /// Default message for a failure of this rule on the field titled `field`.
    pub fn describe(&self, field: &str) -> String {
        match self {
            Rule::NonEmpty => format!("{field} must not be empty"),
            Rule::MinLength(n) => format!("{field} must be at least {n} characters long"),
            Rule::MaxLength(n) => format!("{field} must be at most {n} characters long"),
            Rule::Length(n) => format!("{field} must be exactly {n} characters long"),
            Rule::StartsWith(s) => format!("{field} must start with \"{s}\""),
            Rule::EndsWith(s) => format!("{field} must end with \"{s}\""),
            Rule::Includes(s) => format!("{field} must include \"{s}\""),
            Rule::Trimmed => format!("{field} must not have leading or trailing whitespace"),
            Rule::Alpha => format!("{field} must contain only letters"),
            Rule::Alphanumeric => format!("{field} must contain only letters and digits"),
            Rule::Digits => format!("{field} must contain only digits"),
            Rule::Hex => format!("{field} must contain only hexadecimal characters"),
            Rule::Email => format!("{field} must be a valid email address"),
            Rule::Url => format!("{field} must be a valid URL"),
            Rule::Uuid => format!("{field} must be a valid UUID"),
            Rule::Ip => format!("{field} must be a valid IP address"),
            Rule::IpV4 => format!("{field} must be a valid IPv4 address"),
            Rule::IpV6 => format!("{field} must be a valid IPv6 address"),
            Rule::Pattern(p) => format!("{field} must match the pattern /{p}/"),
            Rule::Lowercased => format!("{field} must be lowercase"),
            Rule::Uppercased => format!("{field} must be uppercase"),
            Rule::Capitalized => format!("{field} must be capitalized"),
            Rule::Uncapitalized => format!("{field} must be uncapitalized"),
            Rule::Positive => format!("{field} must be positive"),
            Rule::NonNegative => format!("{field} must be non-negative"),
            Rule::Negative => format!("{field} must be negative"),
            Rule::NonPositive => format!("{field} must be non-positive"),
            Rule::GreaterThan(n) => format!("{field} must be greater than {n}"),
            Rule::GreaterThanOrEqualTo(n) => {
                format!("{field} must be greater than or equal to {n}")
            }
            Rule::LessThan(n) => format!("{field} must be less than {n}"),
            Rule::LessThanOrEqualTo(n) => format!("{field} must be less than or equal to {n}"),
            Rule::Between(lo, hi) => format!("{field} must be between {lo} and {hi}"),
            Rule::MultipleOf(n) => format!("{field} must be a multiple of {n}"),
            Rule::Finite => format!("{field} must be a finite number"),
            Rule::MinItems(n) => format!("{field} must contain at least {n} items"),
            Rule::MaxItems(n) => format!("{field} must contain at most {n} items"),
            Rule::ItemsCount(n) => format!("{field} must contain exactly {n} items"),
        }
    }
}

fn map_first_char(value: &str, f: impl Fn(char) -> String) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => f(first) + chars.as_str(),
        None => String::new(),
    }
}

fn is_email(value: &str) -> bool {
    let parts: Vec<&str> = value.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

fn is_multiple_of(value: f64, step: f64) -> bool {
    if step == 0.0 || !value.is_finite() {
        return false;
    }
    let quotient = value / step;
    (quotient - quotient.round()).abs() < MULTIPLE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_chars() {
        assert!(Rule::MaxLength(2).check_str("éé"));
        assert!(!Rule::MaxLength(2).check_str("ééé"));
        assert!(Rule::Length(3).check_str("abc"));
    }

    #[test]
    fn test_char_classes_accept_empty() {
        assert!(Rule::Alpha.check_str(""));
        assert!(Rule::Digits.check_str(""));
        assert!(!Rule::Hex.check_str("xyz"));
        assert!(Rule::Hex.check_str("DEADbeef01"));
    }

    #[test]
    fn test_email() {
        assert!(Rule::Email.check_str("user@example.com"));
        assert!(!Rule::Email.check_str("user@localhost"));
        assert!(!Rule::Email.check_str("a@b@c.com"));
        assert!(!Rule::Email.check_str("@example.com"));
    }

    #[test]
    fn test_formats() {
        assert!(Rule::Url.check_str("https://example.com/a"));
        assert!(!Rule::Url.check_str("not a url"));
        assert!(Rule::Uuid.check_str("00000000-0000-0000-0000-000000000000"));
        assert!(Rule::Ip.check_str("::1"));
        assert!(Rule::IpV4.check_str("10.0.0.1"));
        assert!(!Rule::IpV4.check_str("::1"));
        assert!(Rule::IpV6.check_str("fe80::1"));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        assert!(!Rule::Pattern("(".into()).check_str("("));
        assert!(Rule::Pattern("^[a-z]+$".into()).check_str("abc"));
    }

    #[test]
    fn test_pattern_compiles_once() {
        let pattern = Pattern::new("^[0-9]{3}$");
        let first: *const Regex = pattern.regex().unwrap();
        assert!(pattern.is_match("123"));
        assert!(!pattern.is_match("12a"));
        let second: *const Regex = pattern.regex().unwrap();
        assert_eq!(first, second);

        let copy = pattern.clone();
        assert!(copy.is_match("999"));
        assert_eq!(copy, pattern);
    }

    #[test]
    fn test_pattern_serializes_as_string() {
        let rule = Rule::Pattern("^a+$".into());
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json, serde_json::json!({"rule": "pattern", "arg": "^a+$"}));

        let back: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(back, rule);
        assert!(back.check_str("aaa"));
    }

    #[test]
    fn test_normalizations() {
        assert_eq!(Rule::Uppercased.normalize("us").as_deref(), Some("US"));
        assert_eq!(Rule::Capitalized.normalize("hello world").as_deref(), Some("Hello world"));
        assert_eq!(Rule::Uncapitalized.normalize("Hello").as_deref(), Some("hello"));
        assert_eq!(Rule::Capitalized.normalize("").as_deref(), Some(""));
        assert_eq!(Rule::Trimmed.normalize(" x "), None);
    }

    #[test]
    fn test_number_rules() {
        assert!(Rule::Between(-90.0, 90.0).check_number(90.0));
        assert!(!Rule::Between(-90.0, 90.0).check_number(90.5));
        assert!(!Rule::Positive.check_number(0.0));
        assert!(Rule::NonNegative.check_number(0.0));
        assert!(Rule::MultipleOf(0.01).check_number(19.99));
        assert!(!Rule::MultipleOf(5.0).check_number(7.0));
        assert!(!Rule::Finite.check_number(f64::INFINITY));
    }

    #[test]
    fn test_rule_json_shape() {
        let json = serde_json::to_value(Rule::MaxLength(20)).unwrap();
        assert_eq!(json, serde_json::json!({"rule": "max_length", "arg": 20}));
        let json = serde_json::to_value(Rule::NonEmpty).unwrap();
        assert_eq!(json, serde_json::json!({"rule": "non_empty"}));
        let back: Rule = serde_json::from_value(serde_json::json!({"rule": "between", "arg": [0.0, 1.0]})).unwrap();
        assert_eq!(back, Rule::Between(0.0, 1.0));
    }

    #[test]
    fn test_describe_uses_field_title() {
        assert_eq!(
            Rule::MaxLength(20).describe("Postal Code"),
            "Postal Code must be at most 20 characters long"
        );
    }
}

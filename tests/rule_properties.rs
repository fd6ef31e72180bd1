//! Property-based tests for rules and validation.
//!
//! - Case normalization is idempotent, both per rule and through validation
//! - Validated output validates again to itself
//! - Length rules count characters, not bytes
//! - Integer width checks match the Rust type bounds

use proptest::prelude::*;
use schema_catalog::catalog::builtin;
use schema_catalog::schema::{Rule, SchemaRegistry};
use serde_json::json;
use std::sync::OnceLock;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| builtin().unwrap())
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9àéîõüßÀÉÎÕÜ _.-]{0,40}").unwrap()
}

fn case_rule_strategy() -> impl Strategy<Value = Rule> {
    prop_oneof![
        Just(Rule::Lowercased),
        Just(Rule::Uppercased),
        Just(Rule::Capitalized),
        Just(Rule::Uncapitalized),
    ]
}

// =============================================================================
// NORMALIZATION PROPERTIES
// =============================================================================

proptest! {
    /// normalize(normalize(s)) == normalize(s)
    #[test]
    fn normalization_is_idempotent(s in text_strategy(), rule in case_rule_strategy()) {
        let once = rule.normalize(&s).unwrap();
        let twice = rule.normalize(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Validating a normalized record yields the same record.
    #[test]
    fn validation_output_is_a_fixed_point(
        lower in text_strategy(),
        upper in text_strategy(),
        cap in text_strategy(),
        uncap in text_strategy(),
    ) {
        let input = json!({
            "id": "case:1",
            "optionalLowercase": lower,
            "optionalUppercase": upper,
            "optionalCapitalized": cap,
            "optionalUncapitalized": uncap
        });

        let once = registry().validate("CaseValidation", &input).unwrap();
        let twice = registry().validate("CaseValidation", &once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Non-case rules never normalize.
    #[test]
    fn checks_do_not_normalize(n in 0usize..100) {
        prop_assert!(Rule::MaxLength(n).normalize("abc").is_none());
        prop_assert!(Rule::Trimmed.normalize(" abc ").is_none());
    }
}

// =============================================================================
// LENGTH AND WIDTH PROPERTIES
// =============================================================================

proptest! {
    /// A street of up to 200 characters passes, whatever its byte length.
    #[test]
    fn street_length_counts_chars(n in 1usize..=200, c in prop::sample::select(vec!['a', 'é', '字', '🦀'])) {
        let address = json!({
            "street": c.to_string().repeat(n),
            "city": "NYC",
            "state": "NY",
            "postalCode": "10001",
            "country": "US"
        });
        prop_assert!(registry().validate("Address", &address).is_ok());
    }

    /// `positiveU8` accepts exactly 1..=255.
    #[test]
    fn u8_width_matches_rust(n in -1000i64..1000) {
        let mut value = registry().default_value("AllIntegerTypes").unwrap();
        value["positiveU8"] = json!(n);

        let ok = registry().validate("AllIntegerTypes", &value).is_ok();
        prop_assert_eq!(ok, u8::try_from(n).map_or(false, |v| v > 0));
    }
}

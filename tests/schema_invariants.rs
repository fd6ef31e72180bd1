//! Schema Invariant Tests
//!
//! Validation invariants over the built-in catalog:
//! - Validation is deterministic
//! - Required fields must be present, nullish fields may be null or absent
//! - Undeclared fields are stripped, or rejected when configured
//! - Type matching is exact
//! - Enum and reference fields keep their shape rules
//! - Errors are aggregated and scoped to field paths

use schema_catalog::catalog::{builtin, builtin_with};
use schema_catalog::config::{UnknownFieldPolicy, ValidationConfig};
use schema_catalog::schema::{IssueKind, SchemaErrorCode, SchemaRegistry, SchemaValidator};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn registry() -> SchemaRegistry {
    builtin().unwrap()
}

fn address() -> Value {
    json!({
        "street": "",
        "city": "NYC",
        "state": "NY",
        "postalCode": "10001",
        "country": "US"
    })
}

fn issue_paths(registry: &SchemaRegistry, entity: &str, value: &Value) -> Vec<String> {
    registry
        .validate(entity, value)
        .unwrap_err()
        .issues()
        .iter()
        .map(|i| i.path.clone())
        .collect()
}

// =============================================================================
// Validation Determinism Tests
// =============================================================================

/// Same document validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let registry = registry();
    let validator = SchemaValidator::new(&registry);
    let mut doc = address();
    doc["street"] = json!("5th Avenue");

    let first = validator.validate("Address", &doc).unwrap();
    for _ in 0..100 {
        assert_eq!(validator.validate("Address", &doc).unwrap(), first);
    }
}

/// Invalid document fails with the same issues every time.
#[test]
fn test_invalid_document_fails_consistently() {
    let registry = registry();
    let expected = issue_paths(&registry, "Address", &address());

    for _ in 0..100 {
        assert_eq!(issue_paths(&registry, "Address", &address()), expected);
    }
}

// =============================================================================
// Address Example
// =============================================================================

/// Empty street is a constraint violation on `street`.
#[test]
fn test_address_empty_street_fails() {
    let registry = registry();
    let err = registry.validate("Address", &address()).unwrap_err();

    assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].path, "street");
    assert!(matches!(
        err.issues()[0].kind,
        IssueKind::ConstraintViolation { ref rule, .. } if rule == "non_empty"
    ));
}

/// Non-empty street of at most 200 characters passes.
#[test]
fn test_address_street_bounds() {
    let registry = registry();
    let mut doc = address();

    doc["street"] = json!("x");
    assert!(registry.validate("Address", &doc).is_ok());

    doc["street"] = json!("x".repeat(200));
    assert!(registry.validate("Address", &doc).is_ok());

    doc["street"] = json!("x".repeat(201));
    assert!(registry.validate("Address", &doc).is_err());
}

// =============================================================================
// Required / Nullish Field Tests
// =============================================================================

/// Missing required field is reported as missing.
#[test]
fn test_missing_required_field() {
    let registry = registry();
    let mut doc = address();
    doc["street"] = json!("Main");
    doc.as_object_mut().unwrap().remove("city");

    let err = registry.validate("Address", &doc).unwrap_err();
    assert_eq!(err.issues()[0].path, "city");
    assert_eq!(err.issues()[0].kind, IssueKind::MissingField);
}

/// Records without `id` fail.
#[test]
fn test_missing_id_fails() {
    let registry = registry();
    let mut tag = registry.default_value("Tag").unwrap();
    tag.as_object_mut().unwrap().remove("id");

    assert_eq!(issue_paths(&registry, "Tag", &tag), vec!["id"]);
}

/// Required field set to null is a type mismatch.
#[test]
fn test_required_null_is_type_mismatch() {
    let registry = registry();
    let mut tag = registry.default_value("Tag").unwrap();
    tag["name"] = Value::Null;

    let err = registry.validate("Tag", &tag).unwrap_err();
    assert!(matches!(
        err.issues()[0].kind,
        IssueKind::TypeMismatch { ref actual, .. } if actual == "null"
    ));
}

/// Nullish fields accept null, omission and a valid value; omission and
/// null stay distinct in the output.
#[test]
fn test_nullish_field_states() {
    let registry = registry();
    let mut tag = registry.default_value("Tag").unwrap();

    tag["description"] = Value::Null;
    let out = registry.validate("Tag", &tag).unwrap();
    assert_eq!(out["description"], Value::Null);

    tag.as_object_mut().unwrap().remove("description");
    let out = registry.validate("Tag", &tag).unwrap();
    assert!(out.get("description").is_none());

    tag["description"] = json!("Systems programming");
    assert!(registry.validate("Tag", &tag).is_ok());

    tag["description"] = json!("x".repeat(501));
    let err = registry.validate("Tag", &tag).unwrap_err();
    assert_eq!(err.issues()[0].path, "description");
    assert_eq!(err.issues()[0].rule(), Some("max_length"));
}

// =============================================================================
// Undeclared Field Tests
// =============================================================================

/// Undeclared fields are dropped by default.
#[test]
fn test_extra_field_stripped() {
    let registry = registry();
    let mut tag = registry.default_value("Tag").unwrap();
    tag["color"] = json!("red");

    let out = registry.validate("Tag", &tag).unwrap();
    assert!(out.get("color").is_none());
}

/// Undeclared fields fail under the reject policy.
#[test]
fn test_extra_field_rejected_when_configured() {
    let registry = builtin_with(ValidationConfig {
        unknown_fields: UnknownFieldPolicy::Reject,
        ..ValidationConfig::default()
    })
    .unwrap();
    let mut tag = registry.default_value("Tag").unwrap();
    tag["color"] = json!("red");

    let err = registry.validate("Tag", &tag).unwrap_err();
    assert_eq!(err.issues()[0].path, "color");
    assert_eq!(err.issues()[0].rule(), Some("unknown_field"));
}

// =============================================================================
// Type Matching Tests
// =============================================================================

/// Wrong JSON type fails.
#[test]
fn test_type_mismatch_fails() {
    let registry = registry();
    let mut tag = registry.default_value("Tag").unwrap();
    tag["postCount"] = json!("three");

    let err = registry.validate("Tag", &tag).unwrap_err();
    assert_eq!(
        err.issues()[0].kind,
        IssueKind::TypeMismatch {
            expected: "int".into(),
            actual: "string".into()
        }
    );
}

/// Integer fields reject fractional numbers; float fields accept integers.
#[test]
fn test_int_and_float_exactness() {
    let registry = registry();
    let mut product = registry.default_value("Product").unwrap();

    product["price"] = json!(10);
    assert!(registry.validate("Product", &product).is_ok());

    product["stockQuantity"] = json!(1.5);
    assert_eq!(issue_paths(&registry, "Product", &product), vec!["stockQuantity"]);
}

/// Non-object root is a type mismatch at `$root`.
#[test]
fn test_non_object_root() {
    let registry = registry();
    assert_eq!(issue_paths(&registry, "Tag", &json!([1, 2])), vec!["$root"]);
}

/// Unknown entity names fail without issues.
#[test]
fn test_unknown_entity_fails() {
    let registry = registry();
    let err = registry.validate("Nope", &json!({})).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnknownEntity);
    assert!(err.issues().is_empty());
}

// =============================================================================
// Enum / Reference Tests
// =============================================================================

/// Enum fields reject literals outside their set, including case variants.
#[test]
fn test_enum_rejects_unknown_literals() {
    let registry = registry();
    let mut order = registry.default_value("Order").unwrap();

    for literal in ["Lost", "pending", "PENDING", ""] {
        order["status"] = json!(literal);
        let err = registry.validate("Order", &order).unwrap_err();
        assert_eq!(err.issues()[0].rule(), Some("enum"), "literal {:?}", literal);
    }

    order["status"] = json!("Shipped");
    assert!(registry.validate("Order", &order).is_ok());
}

/// References accept a non-empty id or a valid nested object.
#[test]
fn test_reference_shapes() {
    let registry = registry();
    let mut session = registry.default_value("Session").unwrap();

    session["user"] = json!("user:42");
    assert!(registry.validate("Session", &session).is_ok());

    session["user"] = json!("");
    assert_eq!(issue_paths(&registry, "Session", &session), vec!["user"]);

    let mut user = registry.default_value("User").unwrap();
    session["user"] = user.clone();
    assert!(registry.validate("Session", &session).is_ok());

    user["email"] = json!("not-an-email");
    session["user"] = user;
    assert_eq!(issue_paths(&registry, "Session", &session), vec!["user.email"]);
}

/// Issues from several fields and nesting levels are all reported.
#[test]
fn test_errors_aggregate_across_fields() {
    let registry = registry();
    let mut order = registry.default_value("Order").unwrap();
    order["total"] = json!(0);
    order["status"] = json!("Lost");
    order["shippingAddress"]["country"] = json!("USA");
    order["items"] = json!([{"productId": "", "productName": "Pen", "quantity": 1, "unitPrice": 1.0}]);

    assert_eq!(
        issue_paths(&registry, "Order", &order),
        vec!["items[0].productId", "total", "status", "shippingAddress.country"]
    );
}

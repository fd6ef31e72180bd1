//! Catalog error types
//!
//! Error codes:
//! - CATALOG_UNKNOWN_ENTITY (REJECT)
//! - CATALOG_VALIDATION_FAILED (REJECT)
//! - CATALOG_DUPLICATE_DECLARATION (REJECT)
//! - CATALOG_DECODE_FAILED (REJECT)
//! - CATALOG_MALFORMED_SCHEMA (FATAL)
//! - CATALOG_AUDIT_FAILED (FATAL)

use serde::Serialize;
use std::fmt;

/// Severity levels for catalog errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input rejected, catalog unaffected
    Reject,
    /// Catalog cannot be built or used
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Entity or enum name not registered
    UnknownEntity,
    /// Value violates its entity schema
    ValidationFailed,
    /// Name declared twice
    DuplicateDeclaration,
    /// Validated value did not fit the typed model
    DecodeFailed,
    /// Schema file or declaration cannot be read
    MalformedSchema,
    /// Schema-of-schemas audit reported errors
    AuditFailed,
}

impl SchemaErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownEntity => "CATALOG_UNKNOWN_ENTITY",
            SchemaErrorCode::ValidationFailed => "CATALOG_VALIDATION_FAILED",
            SchemaErrorCode::DuplicateDeclaration => "CATALOG_DUPLICATE_DECLARATION",
            SchemaErrorCode::DecodeFailed => "CATALOG_DECODE_FAILED",
            SchemaErrorCode::MalformedSchema => "CATALOG_MALFORMED_SCHEMA",
            SchemaErrorCode::AuditFailed => "CATALOG_AUDIT_FAILED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::MalformedSchema | SchemaErrorCode::AuditFailed => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What went wrong at one field path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Required field absent
    MissingField,
    /// Value has the wrong JSON type (or is null where a value is required)
    TypeMismatch { expected: String, actual: String },
    /// Value has the right type but fails a rule
    ConstraintViolation { rule: String, message: String },
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    /// Field path (e.g. "shippingAddress.street", "items[1].quantity")
    pub path: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: IssueKind::MissingField,
        }
    }

    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: IssueKind::TypeMismatch {
                expected: expected.into(),
                actual: actual.into(),
            },
        }
    }

    pub fn constraint(
        path: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: IssueKind::ConstraintViolation {
                rule: rule.into(),
                message: message.into(),
            },
        }
    }

    /// Rule name for constraint violations
    pub fn rule(&self) -> Option<&str> {
        match &self.kind {
            IssueKind::ConstraintViolation { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingField => write!(f, "field '{}': missing", self.path),
            IssueKind::TypeMismatch { expected, actual } => {
                write!(f, "field '{}': expected {}, got {}", self.path, expected, actual)
            }
            IssueKind::ConstraintViolation { message, .. } => {
                write!(f, "field '{}': {}", self.path, message)
            }
        }
    }
}

/// Catalog error with full context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// Entity (or enum) name if applicable
    entity: Option<String>,
    /// Aggregated field issues, empty unless validation failed
    issues: Vec<FieldIssue>,
}

impl SchemaError {
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        let name = entity.into();
        Self {
            code: SchemaErrorCode::UnknownEntity,
            message: format!("Entity '{}' not found", name),
            entity: Some(name),
            issues: Vec::new(),
        }
    }

    pub fn unknown_enum(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::UnknownEntity,
            message: format!("Enum '{}' not found", name),
            entity: Some(name),
            issues: Vec::new(),
        }
    }

    /// Create a validation failed error carrying every issue found
    pub fn validation_failed(entity: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        let name = entity.into();
        let message = match issues.as_slice() {
            [single] => format!("Validation of '{}' failed: {}", name, single),
            many => format!("Validation of '{}' failed with {} issues", name, many.len()),
        };
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message,
            entity: Some(name),
            issues,
        }
    }

    pub fn duplicate_declaration(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::DuplicateDeclaration,
            message: format!("'{}' is already declared", name),
            entity: Some(name),
            issues: Vec::new(),
        }
    }

    pub fn decode_failed(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = entity.into();
        Self {
            code: SchemaErrorCode::DecodeFailed,
            message: format!("Validated '{}' did not decode: {}", name, reason.into()),
            entity: Some(name),
            issues: Vec::new(),
        }
    }

    /// Create an error for a malformed schema file or declaration
    pub fn malformed_schema(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema '{}': {}", location.into(), reason.into()),
            entity: None,
            issues: Vec::new(),
        }
    }

    pub fn audit_failed(error_count: usize, first: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::AuditFailed,
            message: format!(
                "Catalog audit reported {} error(s), first: {}",
                error_count,
                first.into()
            ),
            entity: None,
            issues: Vec::new(),
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Consumes the error, returning its issues
    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for catalog operations
pub type SchemaResult<T> = Result<T, SchemaError>;

//! Schema subsystem
//!
//! Declarations (entities, enums, field rules), the registry that owns them,
//! and the operations over them: validation, default synthesis and audit.
//!
//! # Design Principles
//!
//! - One explicit registry, built once and passed by reference
//! - Fields and rules keep declaration order
//! - Case rules normalize; every other rule checks
//! - Validation aggregates field issues instead of stopping at the first
//! - Deterministic output for the same input

pub mod audit;
pub mod defaults;
mod errors;
mod format;
mod registry;
mod rules;
mod types;
mod validator;
mod value;

pub use audit::{audit_defaults, audit_registry, AuditFinding, AuditReport, FindingSeverity};
pub use defaults::{default_table, default_value, DefaultEntry};
pub use errors::{FieldIssue, IssueKind, SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use format::Format;
pub use registry::SchemaRegistry;
pub use rules::{Pattern, Rule, RuleKind};
pub use types::{Declaration, EntityKind, EntitySchema, EnumDef, FieldDef, FieldType, IntWidth, Target};
pub use validator::SchemaValidator;
pub use value::{Entity, LiteralEnum, Nullish, Reference};

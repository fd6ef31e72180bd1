//! schema-catalog - A strict, deterministic catalog of record schemas
//!
//! Typed models and field declarations for every built-in entity, with
//! validation, canonical defaults and a schema audit.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod schema;

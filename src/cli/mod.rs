//! CLI module for schema-catalog
//!
//! Provides command-line interface for:
//! - entities: List the catalog
//! - validate: Validate one JSON document against an entity
//! - defaults: Canonical default of one entity or all of them
//! - audit: Audit the catalog and an optional external default table
//! - export: Write every declaration as a schema file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    audit, build_registry, defaults, entities, execute, export, load_config, run, run_command,
    validate,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, read_input, write_error, write_response};

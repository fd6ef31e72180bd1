//! CLI argument definitions using clap
//!
//! Commands:
//! - schema-catalog entities
//! - schema-catalog validate --entity <Name> [--input <file>]
//! - schema-catalog defaults [--entity <Name>]
//! - schema-catalog audit [--defaults <file>]
//! - schema-catalog export --out <dir>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Validate records against the built-in schema catalog
#[derive(Parser, Debug)]
#[command(name = "schema-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every registered entity and enum
    Entities,

    /// Validate a JSON value against an entity
    Validate {
        /// Entity name, e.g. Address
        #[arg(long)]
        entity: String,

        /// Input file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the canonical default of one entity, or the whole table
    Defaults {
        #[arg(long)]
        entity: Option<String>,
    },

    /// Audit the catalog, and optionally an external default table
    Audit {
        /// JSON array of {"entity", "value"} entries
        #[arg(long)]
        defaults: Option<PathBuf>,
    },

    /// Write every declaration as a schema file
    Export {
        /// Target directory, created if missing
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

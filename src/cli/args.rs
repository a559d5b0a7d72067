//! CLI argument definitions using clap
//!
//! Commands:
//! - fieldguard check --schema <name> [--config <path>] [--schema-dir <dir>]
//! - fieldguard schemas [--config <path>] [--schema-dir <dir>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fieldguard - declarative field validation for JSON records
#[derive(Parser, Debug)]
#[command(name = "fieldguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (defaults to ./fieldguard.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of schema documents, overrides the configured one
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate JSON objects read line by line from stdin
    Check {
        /// Name of the schema to validate against
        #[arg(long)]
        schema: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// List loaded schemas and their fields
    Schemas {
        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

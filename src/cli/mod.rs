//! Command-line interface
//!
//! - check: validate JSON lines from stdin against a named schema
//! - schemas: list loaded schemas

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, CommonArgs};
pub use commands::{check, check_stream, describe_schemas, load_schemas, run_command, schemas};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};

/// Parses arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

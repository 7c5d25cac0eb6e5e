//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.

use clap::{ArgMatches, Command};

pub mod health;
pub mod params;
pub mod sensor;
pub mod steam_trap;

pub use params::{
    COMMAND_HEALTH, COMMAND_LIST, COMMAND_SENSOR, COMMAND_STEAM_TRAP, PARAMETER_FORMAT,
    PARAMETER_HEADERS, PARAMETER_PAGE, PARAMETER_PAGE_SIZE, PARAMETER_PRETTY, PARAMETER_VERBOSE,
};

/// Build the complete command tree.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::verbose_parameter())
        .subcommand(health::health_command())
        .subcommand(steam_trap::steam_trap_command())
        .subcommand(sensor::sensor_command())
}

/// Parse the process arguments.
pub fn create_cli_commands() -> ArgMatches {
    cli_command().get_matches()
}

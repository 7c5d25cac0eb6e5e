//! Eversensor command definitions.

use crate::commands::params::{list_parameters, COMMAND_LIST, COMMAND_SENSOR};
use clap::Command;

/// Create the sensor command with all its subcommands.
pub fn sensor_command() -> Command {
    Command::new(COMMAND_SENSOR)
        .about("Eversensor operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List Eversensors")
                .visible_alias("ls")
                .args(list_parameters()),
        )
}

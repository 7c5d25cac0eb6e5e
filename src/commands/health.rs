//! Health check command definition.

use crate::commands::params::COMMAND_HEALTH;
use clap::Command;

/// Create the health command.
pub fn health_command() -> Command {
    Command::new(COMMAND_HEALTH).about("Check whether the Everactive API is reachable and healthy")
}

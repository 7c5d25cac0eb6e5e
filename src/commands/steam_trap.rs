//! Steam trap command definitions.

use crate::commands::params::{list_parameters, COMMAND_LIST, COMMAND_STEAM_TRAP};
use clap::Command;

/// Create the steam trap command with all its subcommands.
pub fn steam_trap_command() -> Command {
    Command::new(COMMAND_STEAM_TRAP)
        .about("Steam trap operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List steam traps")
                .visible_alias("ls")
                .args(list_parameters()),
        )
}

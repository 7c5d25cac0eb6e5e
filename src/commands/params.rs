//! Shared command parameters for all CLI commands.
//!
//! This module defines common parameters that are used across multiple command modules.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};

// Operations
pub const COMMAND_LIST: &str = "list";

// Resource commands
pub const COMMAND_HEALTH: &str = "health";
pub const COMMAND_STEAM_TRAP: &str = "steam-trap";
pub const COMMAND_SENSOR: &str = "sensor";

// Global flags
pub const PARAMETER_VERBOSE: &str = "verbose";

// Parameter names
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_PAGE: &str = "page";
pub const PARAMETER_PAGE_SIZE: &str = "page-size";

// Defaults, kept in line with client::DEFAULT_PAGE and client::DEFAULT_PAGE_SIZE
pub const DEFAULT_PAGE_VALUE: &str = "1";
pub const DEFAULT_PAGE_SIZE_VALUE: &str = "50";

/// Create the format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .default_value("json")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output with headers")
}

/// Page number to request, starting at 1.
pub fn page_parameter() -> Arg {
    Arg::new(PARAMETER_PAGE)
        .long(PARAMETER_PAGE)
        .num_args(1)
        .required(false)
        .default_value(DEFAULT_PAGE_VALUE)
        .help("Page number to fetch")
        .value_parser(clap::value_parser!(u32).range(1..))
}

pub fn page_size_parameter() -> Arg {
    Arg::new(PARAMETER_PAGE_SIZE)
        .long(PARAMETER_PAGE_SIZE)
        .num_args(1)
        .required(false)
        .default_value(DEFAULT_PAGE_SIZE_VALUE)
        .help("Number of records per page")
        .value_parser(clap::value_parser!(u32).range(1..))
}

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Arguments shared by every `list` subcommand.
pub fn list_parameters() -> Vec<Arg> {
    vec![
        page_parameter(),
        page_size_parameter(),
        format_parameter(),
        format_pretty_parameter(),
        format_with_headers_parameter(),
    ]
}

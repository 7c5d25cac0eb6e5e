use evercli::{
    commands::{create_cli_commands, PARAMETER_VERBOSE},
    configuration::Configuration,
};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{execute_command, CliError};

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();

    // Intialize the logging subsystem; RUST_LOG wins over --verbose
    let default_level = if matches.get_flag(PARAMETER_VERBOSE) {
        "evercli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match Configuration::load_default() {
        Ok(configuration) => execute_command(configuration, matches).await,
        Err(e) => Err(CliError::from(e)),
    };

    match result {
        Ok(code) => ::std::process::exit(code.code()),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ::std::process::exit(e.exit_code().code());
        }
    }
}

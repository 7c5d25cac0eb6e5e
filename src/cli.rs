use clap::ArgMatches;
use evercli::{
    client::ApiClient,
    commands::{
        COMMAND_HEALTH, COMMAND_LIST, COMMAND_SENSOR, COMMAND_STEAM_TRAP, PARAMETER_FORMAT,
        PARAMETER_HEADERS, PARAMETER_PAGE, PARAMETER_PAGE_SIZE, PARAMETER_PRETTY,
    },
    configuration::{Configuration, ConfigurationError},
    error::EveractiveError,
    exit_codes::EvercliExitCode,
    format::{Formattable, FormattingError, OutputFormat, OutputFormatOptions},
    http_utils::HttpRequestConfig,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand {0:?}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    #[error("{0}")]
    ApiError(#[from] EveractiveError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> EvercliExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => EvercliExitCode::UsageError,
            CliError::ConfigurationError(_) => EvercliExitCode::ConfigError,
            CliError::FormattingError(_) => EvercliExitCode::DataError,
            CliError::ApiError(e) => e.exit_code(),
        }
    }
}

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    match sub_matches.subcommand() {
        Some(m) => m.0.to_string(),
        None => "unknown".to_string(),
    }
}

fn output_format(sub_matches: &ArgMatches) -> Result<OutputFormat, FormattingError> {
    let format = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(String::as_str)
        .unwrap_or("json");
    let options = OutputFormatOptions {
        with_headers: sub_matches.get_flag(PARAMETER_HEADERS),
        pretty: sub_matches.get_flag(PARAMETER_PRETTY),
    };
    OutputFormat::from_string_with_options(format, options)
}

fn page_arguments(sub_matches: &ArgMatches) -> (u32, u32) {
    let page = sub_matches
        .get_one::<u32>(PARAMETER_PAGE)
        .copied()
        .unwrap_or(evercli::client::DEFAULT_PAGE);
    let page_size = sub_matches
        .get_one::<u32>(PARAMETER_PAGE_SIZE)
        .copied()
        .unwrap_or(evercli::client::DEFAULT_PAGE_SIZE);
    (page, page_size)
}

fn create_client(configuration: &Configuration) -> Result<ApiClient, CliError> {
    let config = HttpRequestConfig::from_configuration(configuration)?;
    let credentials = configuration.credentials()?;
    Ok(ApiClient::with_config(config, credentials)?)
}

/// Run the parsed command and return the exit code to report.
pub async fn execute_command(
    configuration: Configuration,
    matches: ArgMatches,
) -> Result<EvercliExitCode, CliError> {
    trace!("Executing command with {:?}", configuration);

    match matches.subcommand() {
        Some((COMMAND_HEALTH, _)) => {
            let client = create_client(&configuration)?;
            if client.health_check().await? {
                println!("healthy");
                Ok(EvercliExitCode::Success)
            } else {
                println!("unhealthy");
                Ok(EvercliExitCode::Unavailable)
            }
        }
        Some((COMMAND_STEAM_TRAP, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => {
                let format = output_format(sub_matches)?;
                let (page, page_size) = page_arguments(sub_matches);
                let client = create_client(&configuration)?;

                let result = client.list_steam_traps_page(page, page_size).await?;
                debug!("Listed {} steam traps", result.len());
                println!("{}", result.format(&format)?);
                Ok(EvercliExitCode::Success)
            }
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((COMMAND_SENSOR, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => {
                let format = output_format(sub_matches)?;
                let (page, page_size) = page_arguments(sub_matches);
                let client = create_client(&configuration)?;

                let result = client.list_eversensors_page(page, page_size).await?;
                debug!("Listed {} Eversensors", result.len());
                println!("{}", result.format(&format)?);
                Ok(EvercliExitCode::Success)
            }
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
            &matches,
        ))),
    }
}

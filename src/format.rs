//! Formatting utilities for the evercli client.
//!
//! This module provides functionality for formatting output as JSON or CSV.

use csv::Writer;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    /// Error specific to CSV operations
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error when converting bytes to UTF-8 string
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    /// Error specific to CSV writer operations
    #[error("CSV writer error: {0}")]
    CsvWriterError(String),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFormatOptions {
    pub with_headers: bool,
    pub pretty: bool,
}

/// Names of the supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormatKind {
    Json,
    Csv,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// CSV (Comma-Separated Values) format
    Csv(OutputFormatOptions),
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        OutputFormatKind::iter().map(|kind| kind.into()).collect()
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        match OutputFormatKind::from_str(format_str.trim()) {
            Ok(OutputFormatKind::Json) => Ok(OutputFormat::Json(options)),
            Ok(OutputFormatKind::Csv) => Ok(OutputFormat::Csv(options)),
            Err(_) => Err(FormattingError::UnsupportedOutputFormat(
                format_str.to_lowercase(),
            )),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Csv(_) => write!(f, "{}", OutputFormatKind::Csv),
            OutputFormat::Json(_) => write!(f, "{}", OutputFormatKind::Json),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

/// Trait for producing CSV records from data
pub trait CsvRecordProducer {
    /// Returns the header row for the CSV output
    fn csv_header() -> Vec<String>;

    /// Converts the data into CSV records
    fn as_csv_records(&self) -> Vec<Vec<String>>;
}

/// Write an optional header and the given records as CSV text.
pub fn write_csv(
    header: Option<Vec<String>>,
    records: Vec<Vec<String>>,
) -> Result<String, FormattingError> {
    let mut wtr = Writer::from_writer(vec![]);
    if let Some(header) = header {
        wtr.write_record(&header)?;
    }
    for record in records {
        wtr.write_record(&record)?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| FormattingError::CsvWriterError(format!("Failed to finalize CSV: {}", e)))?;
    Ok(String::from_utf8(data)?)
}

pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}

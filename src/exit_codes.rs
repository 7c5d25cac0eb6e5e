//! Custom exit codes for the evercli application
//!
//! Each error kind gets its own exit status so scripts can tell an
//! authentication problem from a network outage or an API refusal.

/// Custom exit codes for evercli
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum EvercliExitCode {
    /// Success (0) - Command completed successfully
    Success = exitcode::OK,

    /// Command line usage error (64) - User input error
    UsageError = exitcode::USAGE,

    /// Data format error (65) - Response data was not what we expected
    DataError = exitcode::DATAERR,

    /// Service unavailable (69) - Health check reported the API as down
    Unavailable = exitcode::UNAVAILABLE,

    /// Configuration error (78) - Missing or invalid configuration
    ConfigError = exitcode::CONFIG,

    /// Authentication error (100) - Credential exchange rejected
    AuthError = 100,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - Remote API returned an error
    ApiError = 102,
}

impl EvercliExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            EvercliExitCode::Success => "Success",
            EvercliExitCode::UsageError => "Command line usage error",
            EvercliExitCode::DataError => "Data format error",
            EvercliExitCode::Unavailable => "Service unavailable",
            EvercliExitCode::ConfigError => "Configuration error",
            EvercliExitCode::AuthError => "Authentication error",
            EvercliExitCode::NetworkError => "Network communication error",
            EvercliExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<EvercliExitCode> for i32 {
    fn from(code: EvercliExitCode) -> Self {
        code.code()
    }
}

use std::fmt;
use thiserror::Error;

/// Type alias for Result with anyhow::Error as the error type.
/// This provides a consistent error handling pattern across the codebase.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Exit codes for the CLI application.
///
/// These codes let wrapping automation distinguish between the
/// different ways a run can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the run completed, including per-view skips and dry runs
    Success = 0,
    /// Application error (API error, network error, JSON decode error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Errors raised while talking to the Satellite API.
///
/// Transport and decode failures are fatal for the whole run: there is no
/// retry path and no persisted state to clean up, so callers propagate
/// these straight up to main.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} failed")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{method} {url} returned a body that is not valid JSON")]
    Decode {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use dark_convert::ConvertError;
use dark_core::ManifestError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Manifest options are incomplete
    #[error("Validation failed: {message}")]
    #[diagnostic(code(dark::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The input could not be parsed as a dashboard
    #[error("Parse error: {message}")]
    #[diagnostic(code(dark::cli::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(dark::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(dark::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Parse { .. } => exit_codes::PARSE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create an IO error for a path
    pub fn io_at(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", path.display(), err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<ManifestError> for CliError {
    fn from(err: ManifestError) -> Self {
        let help = match err {
            ManifestError::MissingName => "Pass the resource name as the first argument",
            ManifestError::MissingFolder => "Pass --folder or set DARK_FOLDER",
        };

        CliError::Validation {
            message: err.to_string(),
            help: Some(help.to_string()),
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Io(err) => err.into(),
            ConvertError::Manifest(err) => err.into(),
            ConvertError::Json(err) => CliError::Parse {
                message: err.to_string(),
                help: Some("The input must be a dashboard exported from Grafana as JSON".to_string()),
            },
            ConvertError::Yaml(err) => CliError::Other {
                message: format!("could not render YAML: {}", err),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing: CliError = ManifestError::MissingFolder.into();
        assert_eq!(missing.exit_code(), exit_codes::VALIDATION_ERROR);

        let json = serde_json_error();
        assert_eq!(CliError::from(json).exit_code(), exit_codes::PARSE_ERROR);

        let io: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io.exit_code(), exit_codes::IO_ERROR);
    }

    fn serde_json_error() -> ConvertError {
        dark_convert::convert_dashboard("{").unwrap_err()
    }
}

use std::result::Result as StdResult;

use thiserror::Error;

/// User-facing message shown when an item row has no description at export time.
pub const MISSING_DESCRIPTION_MESSAGE: &str =
    "Please enter a description for every item before exporting.";

/// Unified error type for the invoice library.
///
/// Field-level invalidity never shows up here: malformed quantities, rates,
/// prices and discounts are excluded from the preview instead.
#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("{MISSING_DESCRIPTION_MESSAGE}")]
    MissingDescription { rows: Vec<usize> },
    #[error("Row not found: {0}")]
    RowNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, InvoiceError>;

/// Error returned by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] InvoiceError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(InvoiceError::Io(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Core(InvoiceError::Serde(err))
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_description_uses_user_message() {
        let err = InvoiceError::MissingDescription { rows: vec![2] };
        assert_eq!(err.to_string(), MISSING_DESCRIPTION_MESSAGE);
    }

    #[test]
    fn cli_error_wraps_core_transparently() {
        let err = CliError::from(InvoiceError::RowNotFound("3".into()));
        assert_eq!(err.to_string(), "Row not found: 3");
    }
}

//! Error handling for the `refapp-ats` CLI
//!
//! Keeps the error chain for display while carrying the exit code the process
//! should end with.

use std::error::Error;
use std::fmt;

use refapp_ats_fields::FormError;

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, EXIT_USAGE)
    }

    /// A config source that could not be read or did not validate.
    pub fn from_load_error(error: anyhow::Error) -> Self {
        Self {
            message: format!("{error:#}"),
            exit_code: EXIT_ERROR,
            source: Some(error.into()),
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            let cause = err.to_string();
            if !result.contains(&cause) {
                result.push_str(&format!("\n  Caused by: {cause}"));
            }
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<FormError> for CliError {
    fn from(error: FormError) -> Self {
        Self {
            message: error.to_string(),
            exit_code: EXIT_USAGE,
            source: Some(Box::new(error)),
        }
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(exit_code = e.exit_code, "command failed");
            eprintln!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_exit_code() {
        let err = CliError::usage("no config source given");
        assert_eq!(err.exit_code, EXIT_USAGE);
        assert_eq!(handle_cli_result::<()>(Err(err)), EXIT_USAGE);
    }

    #[test]
    fn test_form_error_is_usage_error() {
        let err: CliError = FormError::UnknownField { id: "x".into() }.into();
        assert_eq!(err.exit_code, EXIT_USAGE);
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_load_error_keeps_context() {
        let err = anyhow::anyhow!("field 0 has an empty id").context("reading basic.json");
        let err = CliError::from_load_error(err);
        assert_eq!(err.exit_code, EXIT_ERROR);
        assert!(err.full_chain().contains("reading basic.json"));
        assert!(err.full_chain().contains("empty id"));
    }

    #[test]
    fn test_success_exit_code() {
        assert_eq!(handle_cli_result(Ok(())), EXIT_SUCCESS);
    }
}

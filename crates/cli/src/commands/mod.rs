//! Subcommand handlers and terminal output.

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use std::io::Write;

use dapr_store_client::{ApiError, ApiResponse, ConfigError, ErrorPayload, decode_error};
use dapr_store_core::Username;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Client configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend call failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The command acts on a user but none was given.
    #[error("No user given: pass --user or set STORE_USERNAME")]
    MissingUser,

    /// Response could not be rendered.
    #[error("Failed to format response: {0}")]
    Format(#[from] serde_json::Error),

    /// Writing to the terminal failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// The signed-in user, or `CliError::MissingUser`.
pub fn require_user(user: Option<&Username>) -> Result<&Username, CliError> {
    user.ok_or(CliError::MissingUser)
}

/// Render a response body for the terminal; `None` for an empty body.
pub fn format_response(response: &ApiResponse) -> Result<Option<String>, CliError> {
    Ok(match &response.data {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(serde_json::to_string_pretty(other)?),
    })
}

/// Render a failure the way a user should see it.
pub fn format_error(error: &CliError) -> String {
    match error {
        CliError::Api(api_error) => match decode_error(api_error) {
            ErrorPayload::Json(body) => {
                serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
            }
            ErrorPayload::Message(message) => message,
        },
        other => other.to_string(),
    }
}

pub fn print_response(response: &ApiResponse) -> Result<(), CliError> {
    if let Some(text) = format_response(response)? {
        writeln!(std::io::stdout().lock(), "{text}")?;
    }
    Ok(())
}

pub fn report_error(error: &CliError) {
    let _ = writeln!(std::io::stderr().lock(), "{}", format_error(error));
}

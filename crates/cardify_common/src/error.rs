// --- File: crates/cardify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Cardify errors.
///
/// Feature crates keep their own error enums and convert into this one with
/// `From<SpecificError> for CardifyError` when they hand errors to shared code.
#[derive(Error, Debug)]
pub enum CardifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CardifyError {
    fn status_code(&self) -> u16 {
        match self {
            CardifyError::HttpError(_) => 500,
            CardifyError::ParseError(_) => 400,
            CardifyError::ConfigError(_) => 500,
            CardifyError::ValidationError(_) => 400,
            CardifyError::ExternalServiceError { .. } => 502,
            CardifyError::NotFoundError(_) => 404,
            CardifyError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, CardifyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, CardifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, CardifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| CardifyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, CardifyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| CardifyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for CardifyError {
    fn from(err: reqwest::Error) -> Self {
        CardifyError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CardifyError {
    fn from(err: serde_json::Error) -> Self {
        CardifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for CardifyError {
    fn from(err: std::io::Error) -> Self {
        CardifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> CardifyError {
    CardifyError::ConfigError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> CardifyError {
    CardifyError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> CardifyError {
    CardifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

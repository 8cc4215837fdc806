//! Error types and handling for the `WeatherMap` application

use std::collections::HashMap;
use thiserror::Error;

/// Machine-readable classification of upstream API failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Transport failure (DNS, connect, timeout)
    ApiNetworkError,
    /// Provider rejected the API key (HTTP 401)
    ApiUnauthorized,
    /// Provider has nothing for the requested resource (HTTP 404)
    ApiLocationNotFound,
    /// Any other non-success status
    ApiStatus,
    /// Body could not be decoded into the expected shape
    ApiInvalidResponse,
}

/// Main error type for the `WeatherMap` application
#[derive(Error, Debug)]
pub enum WeatherMapError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api {
        message: String,
        code: ErrorCode,
        context: HashMap<String, String>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl WeatherMapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error without extra context
    pub fn api<S: Into<String>>(message: S, code: ErrorCode) -> Self {
        Self::api_with_context(message, code, HashMap::new())
    }

    /// Create a new API error carrying key/value context for logs
    pub fn api_with_context<S: Into<String>>(
        message: S,
        code: ErrorCode,
        context: HashMap<String, String>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            code,
            context,
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Error code for API errors, `None` for everything else
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            WeatherMapError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherMapError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            WeatherMapError::Api {
                code: ErrorCode::ApiUnauthorized,
                ..
            } => "The weather provider rejected the API key.".to_string(),
            WeatherMapError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            WeatherMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherMapError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            WeatherMapError::General { message } => message.clone(),
        }
    }
}

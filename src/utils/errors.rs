//! Error handling for PartyBoard
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for PartyBoard application
#[derive(Error, Debug)]
pub enum PartyBoardError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Invalid event status: {0}")]
    InvalidStatus(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for PartyBoard operations
pub type Result<T> = std::result::Result<T, PartyBoardError>;

impl PartyBoardError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            PartyBoardError::Http(_) => true,
            PartyBoardError::Api { status, .. } => *status >= 500,
            PartyBoardError::Config(_) => false,
            PartyBoardError::Authentication(_) => false,
            PartyBoardError::PermissionDenied(_) => false,
            PartyBoardError::EventNotFound { .. } => false,
            PartyBoardError::UserNotFound { .. } => false,
            PartyBoardError::InvalidStatus(_) => false,
            PartyBoardError::Serialization(_) => false,
            PartyBoardError::Io(_) => true,
            PartyBoardError::UrlParse(_) => false,
            PartyBoardError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PartyBoardError::Config(_) => ErrorSeverity::Critical,
            PartyBoardError::PermissionDenied(_) => ErrorSeverity::Warning,
            PartyBoardError::Authentication(_) => ErrorSeverity::Warning,
            PartyBoardError::InvalidInput(_) => ErrorSeverity::Info,
            PartyBoardError::InvalidStatus(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

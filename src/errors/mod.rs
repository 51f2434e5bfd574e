//! Error handling module for the report client.
//!
//! Provides the crate error type, HTTP status mapping and the backend error envelope.

use reqwest::StatusCode;
use serde::Deserialize;

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const NOT_AUTHENTICATED: &str = "NOT_AUTHENTICATED";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const API_ERROR: &str = "API_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No stored credentials for an operation that needs identity
    NotAuthenticated,
    /// Backend rejected the session (401)
    Unauthorized,
    /// Backend refused access (403)
    Forbidden,
    /// Resource not found (404)
    NotFound,
    /// Backend failure (5xx)
    Server(StatusCode),
    /// Any other non-success response
    Api { status: StatusCode, message: String },
    /// Could not reach the backend
    Network { url: String, message: String },
    /// Request did not complete within the configured timeout
    Timeout,
    /// Response body could not be decoded
    Decode(String),
    /// Local storage failure
    Storage(String),
    /// Invalid input
    Validation(String),
}

impl AppError {
    /// Map a non-success status and its body to an error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized,
            StatusCode::FORBIDDEN => AppError::Forbidden,
            StatusCode::NOT_FOUND => AppError::NotFound,
            s if s.is_server_error() => AppError::Server(s),
            s => {
                let message = serde_json::from_str::<ErrorEnvelope>(body)
                    .ok()
                    .and_then(ErrorEnvelope::into_message)
                    .unwrap_or_else(|| format!("API error: {}", s.as_u16()));
                AppError::Api { status: s, message }
            }
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotAuthenticated => codes::NOT_AUTHENTICATED,
            AppError::Unauthorized => codes::UNAUTHORIZED,
            AppError::Forbidden => codes::FORBIDDEN,
            AppError::NotFound => codes::NOT_FOUND,
            AppError::Server(_) => codes::SERVER_ERROR,
            AppError::Api { .. } => codes::API_ERROR,
            AppError::Network { .. } => codes::NETWORK_ERROR,
            AppError::Timeout => codes::TIMEOUT,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Storage(_) => codes::STORAGE_ERROR,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
        }
    }

    /// Message suitable for display in an error state.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotAuthenticated => "User not authenticated".to_string(),
            AppError::Unauthorized => "Authentication failed - Please log in again".to_string(),
            AppError::Forbidden => "Access forbidden".to_string(),
            AppError::NotFound => "Resource not found".to_string(),
            AppError::Server(_) => "Server error".to_string(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Network { url, .. } => format!(
                "Cannot connect to server at {}. Please check if the backend is running.",
                url
            ),
            AppError::Timeout => "Request timed out".to_string(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Server(_) | AppError::Network { .. } | AppError::Timeout
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.user_message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_timeout() {
            return AppError::Timeout;
        }
        if err.is_decode() {
            return AppError::Decode(format!("Invalid response: {}", err));
        }
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        AppError::Network {
            url,
            message: err.to_string(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        AppError::Storage(format!("Storage error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

/// Error body returned by the backend (`{"error": ..}` or `{"error_msg": ..}`).
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

impl ErrorEnvelope {
    fn into_message(self) -> Option<String> {
        self.error
            .or(self.error_msg)
            .filter(|msg| !msg.trim().is_empty())
    }
}

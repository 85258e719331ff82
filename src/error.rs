//! Error types and handling for the weather dashboard

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the weather dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Missing or invalid configuration (e.g. no API credential)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("{message}")]
    Validation { message: String },

    /// Non-success status returned by the upstream weather service
    #[error("Failed to fetch weather data: OpenWeather API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Network-level failure while talking to the upstream weather service
    #[error("Failed to fetch weather data: {message}")]
    Transport { message: String },

    /// The city file could not be read
    #[error("Failed to read cities file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status this error maps to at the endpoint boundary
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation { .. } => StatusCode::BAD_REQUEST,
            DashboardError::Config { .. }
            | DashboardError::Upstream { .. }
            | DashboardError::Transport { .. }
            | DashboardError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the JSON error body
    #[must_use]
    pub fn client_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "Internal server error".to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "API route error");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }
        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

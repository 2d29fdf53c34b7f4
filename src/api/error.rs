//! Errors surfaced by the admin API client

use thiserror::Error;

/// Failure of a single admin API call
///
/// Carries rendered text rather than the transport's error values so it can
/// be cloned into refresh reports and modal state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("invalid gateway URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a one-line status bar or form banner
    pub fn summary(&self) -> String {
        match self {
            ApiError::Status { status, body, .. } if !body.trim().is_empty() => {
                format!("{} {}", status, body.trim())
            }
            ApiError::Status { status, .. } => format!("request rejected with status {}", status),
            ApiError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        ApiError::Transport {
            url: url.to_string(),
            message,
        }
    }
}

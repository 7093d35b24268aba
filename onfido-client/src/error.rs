use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Pagination error: {0}")]
    Pagination(String),

    #[error("Configuration error: {0}")]
    Config(#[from] client_core::config::ConfigError),

    #[error("API token not configured")]
    MissingToken,
}

impl ClientError {
    /// HTTP status of an API error response, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api(err) => Some(err.status),
            ClientError::Http(err) => err.status(),
            _ => None,
        }
    }
}

/// Non-success response returned by the API.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
    /// Parsed error envelope, when the body carried one.
    pub detail: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub fields: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorDetail,
}

impl ApiError {
    pub fn new(status: StatusCode, body: String) -> Self {
        let detail = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);

        Self {
            status,
            body,
            detail,
        }
    }

    pub fn message(&self) -> &str {
        self.detail
            .as_ref()
            .and_then(|detail| detail.message.as_deref())
            .unwrap_or(&self.body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail.as_ref().and_then(|d| d.error_type.as_deref()) {
            Some(error_type) => write!(
                f,
                "Onfido API error ({}): {} - {}",
                self.status,
                error_type,
                self.message()
            ),
            None => write!(f, "Onfido API error ({}): {}", self.status, self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

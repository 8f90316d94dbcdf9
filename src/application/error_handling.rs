// src/application/error_handling.rs
//
// Error summaries for consumers
//
// ARCHITECTURE:
// - Maps internal errors → cloneable, serializable responses
// - These are what the render layer branches on (network vs parse vs ...)
// - Never exposes transport internals beyond a short detail string
// - Logs errors for debugging

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Error summary published alongside data/loading state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Transport failure or non-2xx status
    Network,

    /// 404 from the API
    NotFound,

    /// Response body was not the JSON we expected
    Parse,

    /// Bad base URL or missing runtime
    Configuration,

    /// Anything else
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::Network(transport_error) => {
                warn!("Network error: {:?}", transport_error);

                Self {
                    error_type: ErrorType::Network,
                    message: "Could not reach the catalog service".to_string(),
                    details: Some(transport_error.to_string()),
                }
            }

            AppError::Status { url, status } => {
                warn!("Request to {} returned {}", url, status);

                Self {
                    error_type: ErrorType::Network,
                    message: format!("Catalog service returned status {}", status),
                    details: Some(url.clone()),
                }
            }

            AppError::NotFound => Self::not_found("Resource"),

            AppError::Parse(serde_error) => {
                error!("Parse error: {:?}", serde_error);

                Self {
                    error_type: ErrorType::Parse,
                    message: "Catalog response could not be read".to_string(),
                    details: Some(serde_error.to_string()),
                }
            }

            AppError::Url(url_error) => Self {
                error_type: ErrorType::Configuration,
                message: "Invalid catalog URL".to_string(),
                details: Some(url_error.to_string()),
            },

            AppError::Config(message) | AppError::Runtime(message) => Self {
                error_type: ErrorType::Configuration,
                message: message.clone(),
                details: None,
            },

            AppError::Other(message) => {
                error!("Other error: {}", message);

                Self {
                    error_type: ErrorType::Internal,
                    message: message.clone(),
                    details: None,
                }
            }
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }

    /// Network-class failures (including 404) as opposed to bad data
    pub fn is_network(&self) -> bool {
        matches!(self.error_type, ErrorType::Network | ErrorType::NotFound)
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self::from_app_error(error)
    }
}

// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Resource not found")]
    NotFound,

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// True for transport failures and non-2xx responses.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Status { .. } | AppError::NotFound
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<tokio::runtime::TryCurrentError> for AppError {
    fn from(err: tokio::runtime::TryCurrentError) -> Self {
        AppError::Runtime(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = AppError::Status {
            url: "https://api.tvmaze.com/shows".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Request to https://api.tvmaze.com/shows failed with status 503"
        );
        assert!(err.is_network_failure());
    }

    #[test]
    fn test_parse_error_is_not_network_failure() {
        let err: AppError = serde_json::from_str::<Vec<u32>>("{oops")
            .unwrap_err()
            .into();
        assert!(!err.is_network_failure());
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::NotFound).unwrap();
        assert_eq!(json, "\"Resource not found\"");
    }
}

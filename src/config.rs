// src/config.rs
//
// Catalog configuration
//
// Everything here has a working default. The only value read from the
// environment is the API base URL.

use std::num::NonZeroUsize;
use std::time::Duration;

use url::Url;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";
pub const BASE_URL_ENV: &str = "SHOWHUB_API_BASE_URL";

/// Quiet period before a filter/search change triggers a fetch
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Shows revealed per sentinel hit
pub const DEFAULT_PAGE_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ApiConfig {
    pub fn parsed_base_url(&self) -> AppResult<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AppError::Config(format!(
                "Unsupported API scheme '{}' in {}",
                other, self.base_url
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api: ApiConfig,
    pub search_debounce: Duration,
    pub page_size: NonZeroUsize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl CatalogConfig {
    /// Defaults, with the base URL overridden by `SHOWHUB_API_BASE_URL` when set.
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            let base_url = base_url.trim();
            if !base_url.is_empty() {
                config.api.base_url = base_url.to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        self.api.parsed_base_url().map(|_| ())
    }
}

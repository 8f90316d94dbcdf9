// src/integrations/tvmaze/client.rs
//
// TVMaze REST API client
//
// ARCHITECTURE:
// - Plain GET + JSON, no auth, no pagination parameters
// - Full collections are fetched; pagination happens client-side
// - One request per call: no retry, no caching (callers own that policy)
// - Transport, status and decoding failures are kept distinct in AppError

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::domain::{Episode, SearchHit, Season, Show};
use crate::error::{AppError, AppResult};
use crate::integrations::show_api::ShowApi;

/// TVMaze API Client
pub struct TvMazeClient {
    base_url: Url,
    http_client: Client,
}

impl TvMazeClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = config.parsed_base_url()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `path` under the configured base, with `params`
    /// appended as an encoded query string.
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();

        let base_path = self.base_url.path().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        url.set_path(&format!("{}/{}", base_path, path));
        url.set_query(None);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        url
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T>(&self, path: &str, params: &[(&str, &str)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path, params);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        if !status.is_success() {
            return Err(AppError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Read first, decode second, so transport and parse failures stay apart
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ShowApi for TvMazeClient {
    async fn load_shows(&self) -> AppResult<Vec<Show>> {
        self.get_json("/shows", &[]).await
    }

    async fn show_details(&self, show_id: u64) -> AppResult<Show> {
        self.get_json(&format!("/shows/{}", show_id), &[]).await
    }

    async fn load_show_seasons(&self, show_id: u64) -> AppResult<Vec<Season>> {
        self.get_json(&format!("/shows/{}/seasons", show_id), &[]).await
    }

    async fn load_show_episodes(&self, season_id: u64) -> AppResult<Vec<Episode>> {
        self.get_json(&format!("/seasons/{}/episodes", season_id), &[])
            .await
    }

    async fn search_shows(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        self.get_json("/search/shows", &[("q", query)]).await
    }

    async fn load_similar_shows(&self, show_id: u64) -> AppResult<Vec<Show>> {
        self.get_json(&format!("/shows/{}/similar", show_id), &[]).await
    }
}

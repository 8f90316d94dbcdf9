// src/integrations/show_api.rs
//
// Catalog API seam
//
// Services depend on this trait, never on a concrete HTTP client.
// Each call is exactly one request: no retry, no caching.

use async_trait::async_trait;

use crate::domain::{Episode, SearchHit, Season, Show};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShowApi: Send + Sync {
    /// GET /shows
    async fn load_shows(&self) -> AppResult<Vec<Show>>;

    /// GET /shows/{id}
    async fn show_details(&self, show_id: u64) -> AppResult<Show>;

    /// GET /shows/{id}/seasons
    async fn load_show_seasons(&self, show_id: u64) -> AppResult<Vec<Season>>;

    /// GET /seasons/{id}/episodes
    async fn load_show_episodes(&self, season_id: u64) -> AppResult<Vec<Episode>>;

    /// GET /search/shows?q={query}
    async fn search_shows(&self, query: &str) -> AppResult<Vec<SearchHit>>;

    /// GET /shows/{id}/similar
    async fn load_similar_shows(&self, show_id: u64) -> AppResult<Vec<Show>>;
}

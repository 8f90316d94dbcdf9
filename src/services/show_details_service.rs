// src/services/show_details_service.rs
//
// Detail page loading: one show with its seasons, plus similar shows.
// Episodes load per season, on demand.

use std::sync::Arc;

use log::debug;
use tokio::runtime::Handle;

use crate::domain::{Episode, Season, Show};
use crate::error::AppResult;
use crate::integrations::{FetchHandle, ShowApi};

/// Handles for everything the detail page renders up front
pub struct ShowDetails {
    pub show_id: u64,
    pub show: FetchHandle<Show>,
    pub seasons: FetchHandle<Vec<Season>>,
    pub similar: FetchHandle<Vec<Show>>,
}

impl ShowDetails {
    pub fn is_loading(&self) -> bool {
        self.show.is_loading() || self.seasons.is_loading() || self.similar.is_loading()
    }

    /// Wait for all three requests to settle
    pub async fn finished(&self) {
        self.show.finished().await;
        self.seasons.finished().await;
        self.similar.finished().await;
    }
}

pub struct ShowDetailsService {
    api: Arc<dyn ShowApi>,
    runtime: Handle,
}

impl ShowDetailsService {
    pub fn new(api: Arc<dyn ShowApi>) -> AppResult<Self> {
        Ok(Self::with_runtime(api, Handle::try_current()?))
    }

    pub fn with_runtime(api: Arc<dyn ShowApi>, runtime: Handle) -> Self {
        Self { api, runtime }
    }

    /// Start the show, seasons and similar-shows requests
    pub fn load(&self, show_id: u64) -> ShowDetails {
        debug!("Loading details for show {}", show_id);

        let api = Arc::clone(&self.api);
        let show = FetchHandle::spawn(&self.runtime, async move { api.show_details(show_id).await });

        let api = Arc::clone(&self.api);
        let seasons = FetchHandle::spawn(&self.runtime, async move {
            api.load_show_seasons(show_id).await
        });

        let api = Arc::clone(&self.api);
        let similar = FetchHandle::spawn(&self.runtime, async move {
            api.load_similar_shows(show_id).await
        });

        ShowDetails {
            show_id,
            show,
            seasons,
            similar,
        }
    }

    pub fn load_episodes(&self, season_id: u64) -> FetchHandle<Vec<Episode>> {
        debug!("Loading episodes for season {}", season_id);

        let api = Arc::clone(&self.api);
        FetchHandle::spawn(&self.runtime, async move {
            api.load_show_episodes(season_id).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::ErrorType;
    use crate::error::AppError;
    use crate::integrations::MockShowApi;
    use mockall::predicate::eq;

    fn season(id: u64, number: u32) -> Season {
        serde_json::from_value(serde_json::json!({"id": id, "number": number})).unwrap()
    }

    fn episode(id: u64, number: u32) -> Episode {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": format!("Episode {}", number), "season": 1, "number": number
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_details() {
        let mut api = MockShowApi::new();
        api.expect_show_details()
            .with(eq(1))
            .times(1)
            .returning(|id| Ok(Show::new(id, "Under the Dome")));
        api.expect_load_show_seasons()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(vec![season(1, 1), season(2, 2)]));
        api.expect_load_similar_shows()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(vec![Show::new(2, "Person of Interest")]));

        let service = ShowDetailsService::new(Arc::new(api)).unwrap();
        let details = service.load(1);
        details.finished().await;

        assert!(!details.is_loading());
        assert_eq!(details.show.data().unwrap().name, "Under the Dome");
        assert_eq!(details.seasons.data().unwrap().len(), 2);
        assert_eq!(details.similar.data().unwrap()[0].id, 2);
    }

    #[tokio::test]
    async fn test_missing_show_is_reported_on_handle() {
        let mut api = MockShowApi::new();
        api.expect_show_details()
            .returning(|_| Err(AppError::NotFound));
        api.expect_load_show_seasons()
            .returning(|_| Err(AppError::NotFound));
        api.expect_load_similar_shows().returning(|_| Ok(Vec::new()));

        let service = ShowDetailsService::new(Arc::new(api)).unwrap();
        let details = service.load(404);
        details.finished().await;

        assert!(details.show.data().is_none());
        assert_eq!(
            details.show.error().unwrap().error_type,
            ErrorType::NotFound
        );
        assert!(details.seasons.error().is_some());
        // Empty is a valid result, not an error
        assert_eq!(details.similar.data(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_load_episodes() {
        let mut api = MockShowApi::new();
        api.expect_load_show_episodes()
            .with(eq(10))
            .times(1)
            .returning(|_| Ok(vec![episode(100, 1), episode(101, 2)]));

        let service = ShowDetailsService::new(Arc::new(api)).unwrap();
        let episodes = service.load_episodes(10);

        let state = episodes.finished().await;
        assert!(state.is_loaded());
        let codes: Vec<String> = episodes.data().unwrap().iter().map(Episode::code).collect();
        assert_eq!(codes, vec!["S01E01", "S01E02"]);
    }

    #[test]
    fn test_requires_runtime() {
        let api = MockShowApi::new();
        let result = ShowDetailsService::new(Arc::new(api));
        assert!(matches!(result, Err(AppError::Runtime(_))));
    }
}

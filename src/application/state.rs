// src/application/state.rs

use std::sync::Arc;

use log::info;
use tokio::runtime::Handle;

use crate::config::CatalogConfig;
use crate::error::AppResult;
use crate::integrations::{ShowApi, TvMazeClient};
use crate::services::{FilteredShowsService, InfiniteScroll, ShowDetailsService};

/// Everything a front end binds to.
/// The catalog pipeline and detail loader share one API client.
pub struct AppState {
    pub config: CatalogConfig,
    pub api: Arc<dyn ShowApi>,
    pub filtered_shows: FilteredShowsService,
    pub show_details: ShowDetailsService,
}

impl AppState {
    /// Validate the config and wire services against the TVMaze API.
    /// Must run inside a Tokio runtime.
    pub fn initialize(config: CatalogConfig) -> AppResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current()?;

        let client = TvMazeClient::new(&config.api)?;
        info!("Catalog API at {}", client.base_url());

        Ok(Self::with_api(config, Arc::new(client), runtime))
    }

    /// Wire services against any `ShowApi` implementation
    pub fn with_api(config: CatalogConfig, api: Arc<dyn ShowApi>, runtime: Handle) -> Self {
        let filtered_shows = FilteredShowsService::with_runtime(
            Arc::clone(&api),
            config.search_debounce,
            runtime.clone(),
        );
        let show_details = ShowDetailsService::with_runtime(Arc::clone(&api), runtime);

        Self {
            config,
            api,
            filtered_shows,
            show_details,
        }
    }

    /// A fresh reveal controller; one per scrolling view
    pub fn infinite_scroll(&self) -> InfiniteScroll {
        InfiniteScroll::new(self.config.page_size)
    }
}

// src/services/filtered_shows_service_tests.rs
//
// Pipeline behaviour under a paused Tokio clock.
//
// COVERED:
// - Debounce: bursts of input changes collapse into one run with final values
// - Browse: catalog fetched once per service and reused afterwards
// - Search: hits unwrapped in API order, then filtered
// - Failures surface as status; earlier results stay published
// - Superseded runs never publish
// - Shutdown/drop cancel pending work

#[cfg(test)]
mod pipeline_tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::application::error_handling::ErrorType;
    use crate::config::CatalogConfig;
    use crate::domain::{Episode, SearchHit, Season, Show};
    use crate::error::{AppError, AppResult};
    use crate::integrations::{MockShowApi, ShowApi};
    use crate::services::filtered_shows_service::{
        CatalogMode, CatalogStatus, FilteredShowsService,
    };

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    /// Scripted API: fixed catalog, canned search results, optional delays
    /// per query, and switchable failures.
    struct FakeShowApi {
        catalog: Vec<Show>,
        results: HashMap<String, Vec<Show>>,
        delays: HashMap<String, Duration>,
        fail_browse: AtomicBool,
        fail_search: AtomicBool,
        load_calls: AtomicUsize,
        search_queries: Mutex<Vec<String>>,
    }

    impl FakeShowApi {
        fn new() -> Self {
            Self {
                catalog: catalog(),
                results: HashMap::new(),
                delays: HashMap::new(),
                fail_browse: AtomicBool::new(false),
                fail_search: AtomicBool::new(false),
                load_calls: AtomicUsize::new(0),
                search_queries: Mutex::new(Vec::new()),
            }
        }

        fn with_results(mut self, query: &str, shows: Vec<Show>) -> Self {
            self.results.insert(query.to_string(), shows);
            self
        }

        fn with_delay(mut self, query: &str, delay: Duration) -> Self {
            self.delays.insert(query.to_string(), delay);
            self
        }

        fn load_calls(&self) -> usize {
            self.load_calls.load(Ordering::SeqCst)
        }

        fn search_queries(&self) -> Vec<String> {
            self.search_queries.lock().unwrap().clone()
        }

        fn unavailable() -> AppError {
            AppError::Status {
                url: "https://api.tvmaze.com".to_string(),
                status: 503,
            }
        }
    }

    #[async_trait]
    impl ShowApi for FakeShowApi {
        async fn load_shows(&self) -> AppResult<Vec<Show>> {
            self.load_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_browse.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            Ok(self.catalog.clone())
        }

        async fn show_details(&self, _show_id: u64) -> AppResult<Show> {
            Err(AppError::NotFound)
        }

        async fn load_show_seasons(&self, _show_id: u64) -> AppResult<Vec<Season>> {
            Err(AppError::NotFound)
        }

        async fn load_show_episodes(&self, _season_id: u64) -> AppResult<Vec<Episode>> {
            Err(AppError::NotFound)
        }

        async fn search_shows(&self, query: &str) -> AppResult<Vec<SearchHit>> {
            self.search_queries.lock().unwrap().push(query.to_string());

            if let Some(delay) = self.delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            if self.fail_search.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }

            let shows = self.results.get(query).cloned().unwrap_or_default();
            Ok(shows
                .into_iter()
                .enumerate()
                .map(|(rank, show)| SearchHit {
                    score: 1.0 - rank as f64 * 0.1,
                    show,
                })
                .collect())
        }

        async fn load_similar_shows(&self, _show_id: u64) -> AppResult<Vec<Show>> {
            Ok(Vec::new())
        }
    }

    fn catalog() -> Vec<Show> {
        vec![
            Show::new(1, "Under the Dome")
                .with_genres(["Drama", "Science-Fiction", "Thriller"])
                .with_rating(Some(6.5)),
            Show::new(2, "Person of Interest")
                .with_genres(["Action", "Crime", "Science-Fiction"])
                .with_rating(Some(8.8)),
            Show::new(3, "Bitten")
                .with_genres(["Drama", "Horror", "Romance"])
                .with_rating(Some(7.4)),
            Show::new(4, "Arrow")
                .with_genres(["Drama", "Action", "Science-Fiction"])
                .with_rating(Some(8.0)),
            Show::new(5, "Unrated Pilot")
                .with_genres(["Comedy"])
                .with_rating(None),
        ]
    }

    fn dome_results() -> Vec<Show> {
        vec![
            Show::new(1, "Under the Dome")
                .with_genres(["Drama", "Science-Fiction", "Thriller"])
                .with_rating(Some(6.5)),
            Show::new(6, "Dome Again")
                .with_genres(["Drama", "Mystery"])
                .with_rating(Some(8.2)),
        ]
    }

    fn service(api: &Arc<FakeShowApi>) -> FilteredShowsService {
        let api: Arc<dyn ShowApi> = api.clone();
        FilteredShowsService::new(api, &CatalogConfig::default()).unwrap()
    }

    fn published_ids(service: &FilteredShowsService) -> Option<Vec<u64>> {
        service
            .shows()
            .get()
            .map(|shows| shows.iter().map(|s| s.id).collect())
    }

    /// Let one debounce window elapse and the run finish
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
    }

    // ========================================================================
    // BROWSE MODE
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_browse_publishes_catalog_and_facets() {
        let api = Arc::new(FakeShowApi::new());
        let service = service(&api);
        assert_eq!(service.status().get(), CatalogStatus::Idle);
        assert!(service.shows().get().is_none());

        service.refresh();
        settle().await;

        assert_eq!(api.load_calls(), 1);
        assert_eq!(published_ids(&service), Some(vec![1, 2, 3, 4, 5]));
        assert_eq!(service.status().get(), CatalogStatus::Ready);
        assert!(service.is_catalog_cached());

        let facets = service.all_shows().get().unwrap();
        let genres: Vec<&str> = facets.iter().map(|f| f.genre.as_str()).collect();
        assert_eq!(
            genres,
            vec![
                "Drama",
                "Science-Fiction",
                "Thriller",
                "Action",
                "Crime",
                "Horror",
                "Romance",
                "Comedy"
            ]
        );
        assert_eq!(facets[0].shows.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_genre_change_refilters_cached_catalog() {
        let api = Arc::new(FakeShowApi::new());
        let service = service(&api);
        service.refresh();
        settle().await;

        service.toggle_genre("Horror");
        settle().await;

        assert_eq!(api.load_calls(), 1);
        assert_eq!(published_ids(&service), Some(vec![3]));
        assert_eq!(
            service.genre_filters().get(),
            vec!["Drama", "Horror", "Romance"]
        );
        // Full-catalog facets are untouched by filtering
        assert_eq!(service.all_shows().get().unwrap().len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_genre_and_rating_filters_intersect() {
        let api = Arc::new(FakeShowApi::new());
        let service = service(&api);

        service.set_selected_genres(["Drama"]);
        service.set_selected_rating("7+");
        settle().await;

        assert_eq!(api.load_calls(), 1);
        assert_eq!(published_ids(&service), Some(vec![3, 4]));

        service.clear_filters();
        settle().await;
        assert_eq!(published_ids(&service), Some(vec![1, 2, 3, 4, 5]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_browse_reuses_cache() {
        let api = Arc::new(FakeShowApi::new().with_results("dome", dome_results()));
        let service = service(&api);

        service.refresh();
        settle().await;
        assert_eq!(service.mode(), CatalogMode::Browse);

        service.set_query("dome");
        settle().await;
        assert_eq!(service.mode(), CatalogMode::Search);
        assert_eq!(published_ids(&service), Some(vec![1, 6]));

        service.set_query("");
        settle().await;

        assert_eq!(api.load_calls(), 1);
        assert_eq!(published_ids(&service), Some(vec![1, 2, 3, 4, 5]));
    }

    // ========================================================================
    // SEARCH MODE + DEBOUNCE
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_query_burst_triggers_single_search() {
        let api = Arc::new(FakeShowApi::new().with_results("dome", dome_results()));
        let service = service(&api);

        service.set_query("d");
        tokio::time::sleep(Duration::from_millis(100)).await;
        service.set_query("do");
        tokio::time::sleep(Duration::from_millis(100)).await;
        service.set_query("dome");

        settle().await;

        assert_eq!(api.search_queries(), vec!["dome"]);
        assert_eq!(api.load_calls(), 0);
        assert_eq!(published_ids(&service), Some(vec![1, 6]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_runs_before_quiet_period() {
        let api = Arc::new(FakeShowApi::new().with_results("dome", dome_results()));
        let service = service(&api);

        service.set_query("dome");
        tokio::time::sleep(Duration::from_millis(499)).await;

        assert!(service.is_pending());
        assert!(api.search_queries().is_empty());

        settle().await;
        assert!(!service.is_pending());
        assert_eq!(api.search_queries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rating_change_within_window_joins_the_run() {
        let api = Arc::new(FakeShowApi::new().with_results("dome", dome_results()));
        let service = service(&api);

        service.set_query("dome");
        service.set_selected_rating("8+");
        settle().await;

        assert_eq!(api.search_queries(), vec!["dome"]);
        assert_eq!(published_ids(&service), Some(vec![6]));
        assert_eq!(service.genre_filters().get(), vec!["Drama", "Mystery"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_match_is_empty_not_error() {
        let api = Arc::new(FakeShowApi::new());
        let service = service(&api);

        service.set_query("zzzz");
        settle().await;

        assert_eq!(published_ids(&service), Some(vec![]));
        assert_eq!(service.status().get(), CatalogStatus::Empty);
        assert!(service.genre_filters().get().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_input_does_not_schedule() {
        let api = Arc::new(FakeShowApi::new());
        let service = service(&api);

        service.set_query("");
        service.set_selected_rating("");
        assert!(!service.is_pending());
    }

    // ========================================================================
    // FAILURES
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_failed_browse_reports_status() {
        let api = Arc::new(FakeShowApi::new());
        api.fail_browse.store(true, Ordering::SeqCst);
        let service = service(&api);

        service.refresh();
        settle().await;

        let status = service.status().get();
        assert_eq!(status.error().unwrap().error_type, ErrorType::Network);
        assert!(service.shows().get().is_none());
        assert!(!service.is_catalog_cached());

        // Next browse run fetches again and fills the cache
        api.fail_browse.store(false, Ordering::SeqCst);
        service.refresh();
        settle().await;

        assert_eq!(api.load_calls(), 2);
        assert_eq!(service.status().get(), CatalogStatus::Ready);
        assert!(service.is_catalog_cached());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_keeps_previous_shows() {
        let api = Arc::new(FakeShowApi::new().with_results("dome", dome_results()));
        let service = service(&api);

        service.set_query("dome");
        settle().await;
        assert_eq!(published_ids(&service), Some(vec![1, 6]));

        api.fail_search.store(true, Ordering::SeqCst);
        service.set_query("arrow");
        settle().await;

        assert!(matches!(service.status().get(), CatalogStatus::Failed(_)));
        assert_eq!(published_ids(&service), Some(vec![1, 6]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_search_is_discarded() {
        let slow = vec![Show::new(10, "Slow Show").with_genres(["Drama"])];
        let fast = vec![Show::new(20, "Fast Show").with_genres(["Comedy"])];
        let api = Arc::new(
            FakeShowApi::new()
                .with_results("slow", slow)
                .with_results("fast", fast)
                .with_delay("slow", Duration::from_millis(1000)),
        );
        let service = service(&api);

        // "slow" starts at 500ms and resolves at 1500ms
        service.set_query("slow");
        settle().await;
        assert!(service.status().get().is_loading());

        // "fast" starts at 1100ms and resolves immediately
        service.set_query("fast");
        settle().await;
        assert_eq!(published_ids(&service), Some(vec![20]));

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(api.search_queries(), vec!["slow", "fast"]);
        assert_eq!(published_ids(&service), Some(vec![20]));
        assert_eq!(service.status().get(), CatalogStatus::Ready);
    }

    // ========================================================================
    // TEARDOWN
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_run() {
        let api = Arc::new(FakeShowApi::new().with_results("dome", dome_results()));
        let service = service(&api);

        service.set_query("dome");
        service.shutdown();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(api.search_queries().is_empty());
        assert!(service.is_shut_down());
        assert_eq!(service.query().listener_count(), 0);

        // Inputs are detached: further edits schedule nothing
        service.set_query("again");
        assert!(!service.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_run_does_not_publish_after_shutdown() {
        let api = Arc::new(
            FakeShowApi::new()
                .with_results("slow", dome_results())
                .with_delay("slow", Duration::from_millis(1000)),
        );
        let service = service(&api);

        service.set_query("slow");
        settle().await;
        service.shutdown();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(api.search_queries(), vec!["slow"]);
        assert!(service.shows().get().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_run() {
        let api = Arc::new(FakeShowApi::new());
        {
            let service = service(&api);
            service.refresh();
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(api.load_calls(), 0);
    }

    #[test]
    fn test_requires_runtime() {
        let api: Arc<dyn ShowApi> = Arc::new(FakeShowApi::new());
        let result = FilteredShowsService::new(api, &CatalogConfig::default());
        assert!(matches!(result, Err(AppError::Runtime(_))));
    }

    // ========================================================================
    // MOCKED API
    // ========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_browse_never_searches() {
        let mut api = MockShowApi::new();
        api.expect_load_shows().times(1).returning(|| Ok(catalog()));
        api.expect_search_shows().never();

        let service = FilteredShowsService::new(Arc::new(api), &CatalogConfig::default()).unwrap();
        service.refresh();
        settle().await;
        service.set_selected_rating("8");
        settle().await;

        assert_eq!(published_ids(&service), Some(vec![2, 4]));
    }
}

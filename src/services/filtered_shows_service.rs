// src/services/filtered_shows_service.rs
//
// Search / filter orchestration
//
// RULES:
// - Any change to query, genres or rating re-runs the pipeline (debounced)
// - Empty query browses the full catalog, fetched at most once per service
// - Non-empty query searches; scores are dropped, API order is kept
// - Published shows always come from a single source collection
// - A run that started before the latest one never publishes
// - Fetch failures become status, never panics or errors out of a listener

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use crate::application::error_handling::ErrorResponse;
use crate::config::CatalogConfig;
use crate::domain::{distinct_genres, group_by_genre, FilterCriteria, GenreFacet, Show};
use crate::error::AppResult;
use crate::integrations::ShowApi;
use crate::reactive::{Debouncer, Observable, SubscriptionId};

/// What the render layer should show for the current result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum CatalogStatus {
    /// Nothing requested yet
    Idle,
    Loading,
    /// Non-empty result published
    Ready,
    /// Valid response with zero matching shows
    Empty,
    /// Last fetch failed; previously published shows are left in place
    Failed(ErrorResponse),
}

impl CatalogStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogMode {
    Browse,
    Search,
}

impl CatalogMode {
    fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Self::Browse
        } else {
            Self::Search
        }
    }
}

struct Pipeline {
    api: Arc<dyn ShowApi>,
    debouncer: Debouncer,

    // Inputs
    query: Observable<String>,
    selected_genres: Observable<BTreeSet<String>>,
    selected_rating: Observable<String>,

    // Outputs
    shows: Observable<Option<Vec<Show>>>,
    all_shows: Observable<Option<Vec<GenreFacet>>>,
    genre_filters: Observable<Vec<String>>,
    status: Observable<CatalogStatus>,

    /// Full catalog, written by the first successful browse fetch only
    base_catalog: OnceLock<Arc<Vec<Show>>>,
    generation: AtomicU64,
    disposed: AtomicBool,
}

impl Pipeline {
    fn trigger(self: &Arc<Self>) {
        if self.is_disposed() {
            return;
        }

        debug!(
            "Catalog pipeline scheduled in {:?}",
            self.debouncer.delay()
        );
        let pipeline = Arc::downgrade(self);
        self.debouncer.schedule(move || async move {
            if let Some(pipeline) = pipeline.upgrade() {
                pipeline.run().await;
            }
        });
    }

    async fn run(&self) {
        if self.is_disposed() {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.query.get();
        let mode = CatalogMode::for_query(&query);
        self.status.set(CatalogStatus::Loading);

        let source = match mode {
            CatalogMode::Browse => self.browse().await,
            CatalogMode::Search => self.search(&query).await,
        };

        if self.is_stale(generation) {
            debug!(
                "Discarding {:?} result from superseded run {}",
                mode, generation
            );
            return;
        }

        match source {
            Ok(shows) => self.publish(&shows),
            Err(e) => {
                warn!("Catalog {:?} fetch failed: {}", mode, e);
                self.status
                    .set(CatalogStatus::Failed(ErrorResponse::from_app_error(&e)));
            }
        }
    }

    async fn browse(&self) -> AppResult<Arc<Vec<Show>>> {
        if let Some(cached) = self.base_catalog.get() {
            debug!("Browsing cached catalog ({} shows)", cached.len());
            return Ok(Arc::clone(cached));
        }

        info!("Fetching full show catalog");
        let fetched = Arc::new(self.api.load_shows().await?);

        if self.base_catalog.set(Arc::clone(&fetched)).is_ok() {
            info!("Cached {} shows for browsing", fetched.len());
            if !self.is_disposed() {
                self.all_shows.set(Some(group_by_genre(&fetched)));
            }
        }

        // An overlapping run may have filled the cache first; keep one source
        Ok(self
            .base_catalog
            .get()
            .map(Arc::clone)
            .unwrap_or(fetched))
    }

    async fn search(&self, query: &str) -> AppResult<Arc<Vec<Show>>> {
        info!("Searching shows for {:?}", query);
        let hits = self.api.search_shows(query).await?;
        Ok(Arc::new(hits.into_iter().map(|hit| hit.show).collect()))
    }

    fn publish(&self, source: &[Show]) {
        let filtered = self.criteria().apply(source);

        debug!(
            "Publishing {} of {} shows",
            filtered.len(),
            source.len()
        );

        let status = if filtered.is_empty() {
            CatalogStatus::Empty
        } else {
            CatalogStatus::Ready
        };

        self.genre_filters.set(distinct_genres(&filtered));
        self.shows.set(Some(filtered));
        self.status.set(status);
    }

    fn criteria(&self) -> FilterCriteria {
        let rating = self.selected_rating.get();
        FilterCriteria {
            search_query: self.query.get(),
            selected_genres: self.selected_genres.get(),
            min_rating: (!rating.is_empty()).then_some(rating),
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.is_disposed() || self.generation.load(Ordering::SeqCst) != generation
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

struct InputSubscriptions {
    query: SubscriptionId,
    selected_genres: SubscriptionId,
    selected_rating: SubscriptionId,
}

/// Debounced search/browse pipeline over observable filter inputs.
///
/// Must be created inside a Tokio runtime. Dropping the service (or calling
/// [`shutdown`](Self::shutdown)) cancels any pending run and detaches the
/// input listeners.
pub struct FilteredShowsService {
    pipeline: Arc<Pipeline>,
    subscriptions: Mutex<Option<InputSubscriptions>>,
}

impl FilteredShowsService {
    pub fn new(api: Arc<dyn ShowApi>, config: &CatalogConfig) -> AppResult<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(api, config.search_debounce, runtime))
    }

    pub fn with_runtime(api: Arc<dyn ShowApi>, debounce: Duration, runtime: Handle) -> Self {
        let pipeline = Arc::new(Pipeline {
            api,
            debouncer: Debouncer::trailing(debounce, runtime),
            query: Observable::labeled("query", String::new()),
            selected_genres: Observable::labeled("selected_genres", BTreeSet::new()),
            selected_rating: Observable::labeled("selected_rating", String::new()),
            shows: Observable::labeled("shows", None),
            all_shows: Observable::labeled("all_shows", None),
            genre_filters: Observable::labeled("genre_filters", Vec::new()),
            status: Observable::labeled("status", CatalogStatus::Idle),
            base_catalog: OnceLock::new(),
            generation: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        });

        let subscriptions = InputSubscriptions {
            query: pipeline.query.subscribe(Self::retrigger(&pipeline)),
            selected_genres: pipeline
                .selected_genres
                .subscribe(Self::retrigger(&pipeline)),
            selected_rating: pipeline
                .selected_rating
                .subscribe(Self::retrigger(&pipeline)),
        };

        Self {
            pipeline,
            subscriptions: Mutex::new(Some(subscriptions)),
        }
    }

    fn retrigger<T: 'static>(pipeline: &Arc<Pipeline>) -> impl Fn(&T) + Send + Sync + 'static {
        let pipeline = Arc::downgrade(pipeline);
        move |_: &T| {
            if let Some(pipeline) = pipeline.upgrade() {
                pipeline.trigger();
            }
        }
    }

    // ========================================================================
    // INPUTS
    // ========================================================================

    pub fn query(&self) -> &Observable<String> {
        &self.pipeline.query
    }

    pub fn selected_genres(&self) -> &Observable<BTreeSet<String>> {
        &self.pipeline.selected_genres
    }

    pub fn selected_rating(&self) -> &Observable<String> {
        &self.pipeline.selected_rating
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.pipeline.query.set(query.into());
    }

    pub fn set_selected_genres<I, S>(&self, genres: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pipeline
            .selected_genres
            .set(genres.into_iter().map(Into::into).collect());
    }

    /// Add the genre if absent, remove it otherwise
    pub fn toggle_genre(&self, genre: &str) {
        self.pipeline.selected_genres.update(|genres| {
            if !genres.remove(genre) {
                genres.insert(genre.to_string());
            }
        });
    }

    /// Minimum rating selector value, e.g. "8+"; empty clears it
    pub fn set_selected_rating(&self, rating: impl Into<String>) {
        self.pipeline.selected_rating.set(rating.into());
    }

    /// Clear genre and rating selections (the query is kept)
    pub fn clear_filters(&self) {
        self.pipeline.selected_genres.set(BTreeSet::new());
        self.pipeline.selected_rating.set(String::new());
    }

    /// Re-run the pipeline with the current inputs (debounced like any change)
    pub fn refresh(&self) {
        self.pipeline.trigger();
    }

    // ========================================================================
    // OUTPUTS
    // ========================================================================

    /// Filtered shows; `None` until the first run publishes
    pub fn shows(&self) -> &Observable<Option<Vec<Show>>> {
        &self.pipeline.shows
    }

    /// Genre facets over the full, unfiltered catalog
    pub fn all_shows(&self) -> &Observable<Option<Vec<GenreFacet>>> {
        &self.pipeline.all_shows
    }

    /// Genres present in the current filtered result
    pub fn genre_filters(&self) -> &Observable<Vec<String>> {
        &self.pipeline.genre_filters
    }

    pub fn status(&self) -> &Observable<CatalogStatus> {
        &self.pipeline.status
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.pipeline.criteria()
    }

    pub fn mode(&self) -> CatalogMode {
        self.pipeline.query.read(|query| CatalogMode::for_query(query))
    }

    pub fn is_catalog_cached(&self) -> bool {
        self.pipeline.base_catalog.get().is_some()
    }

    /// True while a debounced run is waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.pipeline.debouncer.is_pending()
    }

    // ========================================================================
    // TEARDOWN
    // ========================================================================

    /// Cancel the pending run, detach input listeners and stop in-flight
    /// runs from publishing. Idempotent.
    pub fn shutdown(&self) {
        self.pipeline.disposed.store(true, Ordering::SeqCst);

        if self.pipeline.debouncer.cancel() {
            debug!("Cancelled pending catalog run on shutdown");
        }

        let subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subs) = subscriptions {
            self.pipeline.query.unsubscribe(subs.query);
            self.pipeline
                .selected_genres
                .unsubscribe(subs.selected_genres);
            self.pipeline
                .selected_rating
                .unsubscribe(subs.selected_rating);
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.pipeline.is_disposed()
    }
}

impl Drop for FilteredShowsService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

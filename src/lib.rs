// src/lib.rs
// ShowHub - TV show catalog core
//
// Architecture:
// - Domain: show data plus pure filtering and genre facets
// - Reactive: observable state and a trailing debouncer
// - Integrations: the catalog API seam and its TVMaze client
// - Services: search/filter pipeline, infinite scroll, show details
// - Application: wiring and consumer-facing errors
//
// No logger is installed here; binaries pick their own `log` backend.

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod reactive;

// ============================================================================
// SERVICES
// ============================================================================

pub mod integrations;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    distinct_genres,
    filter_shows,
    group_by_genre,
    // Seasons
    Country,
    Episode,
    // Filtering
    FilterCriteria,
    GenreFacet,
    Image,
    ImageSize,
    Network,
    Rating,
    RatingThreshold,
    SearchHit,
    Season,
    // Shows
    Show,
    DEFAULT_IMAGE_URL,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::{ApiConfig, CatalogConfig};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Reactive
// ============================================================================

pub use reactive::{Debouncer, Observable, SubscriptionId};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{FetchHandle, FetchState, ShowApi, TvMazeClient};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CatalogMode,
    CatalogStatus,
    FilteredShowsService,
    InfiniteScroll,
    Sentinel,
    ShowDetails,
    ShowDetailsService,
    Visibility,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

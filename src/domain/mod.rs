// src/domain/mod.rs
//
// Domain Root
//
// Catalog data as delivered by the API, plus the pure derivations
// (filtering, genre facets) the pipeline applies to it.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod facet;
pub mod filter;
pub mod season;
pub mod show;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Show Domain
pub use show::{Image, ImageSize, Rating, SearchHit, Show, DEFAULT_IMAGE_URL};

// Season Domain
pub use season::{Country, Episode, Network, Season};

// Filtering
pub use filter::{filter_shows, FilterCriteria, RatingThreshold};

// Facets (Derived Data)
pub use facet::{distinct_genres, group_by_genre, GenreFacet};

// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod filtered_shows_service;
pub mod infinite_scroll;
pub mod show_details_service;

#[cfg(test)]
mod filtered_shows_service_tests;

pub use filtered_shows_service::{CatalogMode, CatalogStatus, FilteredShowsService};

pub use infinite_scroll::{InfiniteScroll, Sentinel, Visibility};

pub use show_details_service::{ShowDetails, ShowDetailsService};

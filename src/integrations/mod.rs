// src/integrations/mod.rs
//
// External Integrations Module
//
// The catalog API seam (ShowApi), its TVMaze implementation, and the
// polled request handle used by detail views.

pub mod fetch;
pub mod show_api;
pub mod tvmaze;

pub use fetch::{FetchHandle, FetchState};
pub use show_api::ShowApi;
pub use tvmaze::client::TvMazeClient;

#[cfg(test)]
pub use show_api::MockShowApi;

// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Wires config, API client and services into one state object
// - Translates internal errors into consumer-facing responses
// - Holds no catalog logic of its own

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;

// src/reactive/mod.rs
//
// Reactive primitives: observable state and a trailing debouncer.

pub mod debounce;
pub mod observable;

pub use debounce::Debouncer;
pub use observable::{Observable, SubscriptionId};

pub mod entity;

pub use entity::{Country, Episode, Network, Season};

pub mod entity;

pub use entity::{Image, ImageSize, Rating, SearchHit, Show, DEFAULT_IMAGE_URL};

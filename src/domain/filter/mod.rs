pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, RatingThreshold};
pub use engine::filter_shows;

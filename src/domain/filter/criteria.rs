use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::show::Show;

/// Current filter selections.
/// Transient: owned by whoever drives the search/browse pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_query: String,
    pub selected_genres: BTreeSet<String>,
    /// Raw selector value such as "8+"; empty means no threshold
    pub min_rating: Option<String>,
}

/// Parsed form of the minimum rating selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingThreshold {
    /// No rating filter
    Any,
    /// Keep shows whose average is >= the value
    AtLeast(f64),
    /// Selector could not be read as a number; nothing compares >= to it
    Unsatisfiable,
}

impl RatingThreshold {
    /// Reads selector values like "8+", " 7 " or "".
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Any;
        };
        if raw.is_empty() {
            return Self::Any;
        }

        let cleaned = raw.trim().replacen('+', "", 1);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Self::Any;
        }

        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::AtLeast(value),
            _ => {
                warn!("Unreadable rating threshold {:?}; excluding all shows", raw);
                Self::Unsatisfiable
            }
        }
    }

    /// A show without a rating average never passes a numeric threshold.
    pub fn admits(&self, show: &Show) -> bool {
        match self {
            Self::Any => true,
            Self::AtLeast(min) => show.rating_average().is_some_and(|avg| avg >= *min),
            Self::Unsatisfiable => false,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Any)
    }
}

impl FilterCriteria {
    pub fn rating_threshold(&self) -> RatingThreshold {
        RatingThreshold::parse(self.min_rating.as_deref())
    }

    pub fn is_search(&self) -> bool {
        !self.search_query.is_empty()
    }

    /// True when neither genre nor rating narrows the collection
    pub fn is_unfiltered(&self) -> bool {
        self.selected_genres.is_empty() && !self.rating_threshold().is_active()
    }

    pub fn apply(&self, shows: &[Show]) -> Vec<Show> {
        super::engine::filter_shows(&self.selected_genres, self.min_rating.as_deref(), shows)
    }
}

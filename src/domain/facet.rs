use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::show::Show;

/// A genre label paired with the shows carrying it.
/// Derived data: recomputed from a show collection, never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreFacet {
    pub genre: String,
    pub shows: Vec<Show>,
}

impl GenreFacet {
    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }
}

/// Distinct genres in order of first appearance
pub fn distinct_genres(shows: &[Show]) -> Vec<String> {
    let mut seen = HashSet::new();
    shows
        .iter()
        .flat_map(|show| show.genres.iter())
        .filter(|genre| seen.insert(genre.as_str()))
        .cloned()
        .collect()
}

/// One facet per distinct genre; a show appears under each of its genres.
pub fn group_by_genre(shows: &[Show]) -> Vec<GenreFacet> {
    distinct_genres(shows)
        .into_iter()
        .map(|genre| {
            let members = shows
                .iter()
                .filter(|show| show.has_genre(&genre))
                .cloned()
                .collect();
            GenreFacet {
                genre,
                shows: members,
            }
        })
        .collect()
}

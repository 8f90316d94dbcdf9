use std::collections::BTreeSet;

use super::criteria::RatingThreshold;
use crate::domain::show::Show;

/// Narrows `shows` by genre and minimum rating.
///
/// - Rating: keep shows whose average is >= the parsed threshold ("8+" reads as 8).
///   Unrated shows are dropped whenever a threshold is active.
/// - Genres: keep shows carrying at least one of the selected genres.
/// - The two dimensions intersect.
///
/// Always returns a fresh collection in source order; the input is never touched.
pub fn filter_shows(
    genres: &BTreeSet<String>,
    rating_threshold: Option<&str>,
    shows: &[Show],
) -> Vec<Show> {
    let threshold = RatingThreshold::parse(rating_threshold);

    shows
        .iter()
        .filter(|show| threshold.admits(show))
        .filter(|show| genres.is_empty() || show.genres.iter().any(|g| genres.contains(g)))
        .cloned()
        .collect()
}

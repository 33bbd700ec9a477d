use super::registry::{Question, Registry};
use super::scoring::ScoreState;

/// Picks disambiguating questions for the leading categories.
///
/// Looks at the `limit` best-ranked categories and returns each one's
/// registered supplementary question in rank order. Categories without a
/// question are skipped, so the result may be shorter than `limit`.
pub fn select_supplementary<'r>(
    scores: &ScoreState,
    registry: &'r Registry,
    limit: usize,
) -> Vec<&'r Question> {
    scores
        .rank()
        .top(limit)
        .filter_map(|entry| registry.supplementary_for(entry.category))
        .collect()
}

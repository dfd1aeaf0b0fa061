use std::cmp::Ordering;

use super::super::domain::{CategoryScores, DegreeRecommendation, RankedCategory};
use super::catalog::{degree_programs, RECOMMENDATION_SLOTS};

/// Highest-scoring `n` categories with 1-based ranks. Ties keep declaration order.
pub fn top_n(scores: &CategoryScores, n: usize) -> Vec<RankedCategory> {
    let mut entries: Vec<_> = scores.iter().collect();
    // `sort_by` is stable, so equal scores stay in declaration order.
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    entries
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(index, (category, score))| RankedCategory {
            rank: index + 1,
            category,
            score,
        })
        .collect()
}

/// Expand ranked categories into concrete programs, stopping at the third program overall.
/// Each program carries its category's current score.
pub fn degrees_from_top(
    ranked: &[RankedCategory],
    scores: &CategoryScores,
) -> Vec<DegreeRecommendation> {
    ranked
        .iter()
        .flat_map(|item| {
            degree_programs(item.category)
                .iter()
                .map(move |program| (item.category, program))
        })
        .take(RECOMMENDATION_SLOTS)
        .enumerate()
        .map(|(index, (category, program))| DegreeRecommendation {
            rank: index + 1,
            category,
            code: program.code.to_string(),
            name: program.name.to_string(),
            score: scores.get(category),
        })
        .collect()
}

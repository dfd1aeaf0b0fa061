mod boosts;
mod catalog;
mod credentials;
mod ranking;
mod scoring;
mod thresholds;

pub use boosts::apply_academic_boosts;
pub use catalog::{degree_programs, DegreeProgram, RECOMMENDATION_SLOTS};
pub use credentials::SubjectStrength;
pub use ranking::{degrees_from_top, top_n};
pub use scoring::score;
pub use thresholds::apply_threshold_adjustments;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{AssessmentSnapshot, CategoryScores, DegreeRecommendation, RankedCategory};

/// Stateless engine running the scoring pipeline over one assessment snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// score, then academic boosts (only with a profile), then threshold penalties, then ranking.
    pub fn recommend(&self, snapshot: &AssessmentSnapshot) -> RecommendationOutcome {
        let academic = snapshot.academic_profile.as_ref();

        let raw = score(&snapshot.part1_selected, &snapshot.part2_answers);
        let boosted = match academic {
            Some(profile) => apply_academic_boosts(&raw, profile),
            None => raw,
        };
        let adjusted = apply_threshold_adjustments(&boosted, academic);

        let recommended_top3 = top_n(&adjusted, RECOMMENDATION_SLOTS);
        let recommended_degrees = degrees_from_top(&recommended_top3, &adjusted);

        debug!(
            has_profile = academic.is_some(),
            top = ?recommended_top3.first().map(|item| item.category),
            degrees = recommended_degrees.len(),
            "recommendation computed"
        );

        RecommendationOutcome {
            category_scores: adjusted,
            recommended_top3,
            recommended_degrees,
        }
    }
}

/// Engine output: the full score table plus the ranked categories and concrete programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    pub category_scores: CategoryScores,
    pub recommended_top3: Vec<RankedCategory>,
    pub recommended_degrees: Vec<DegreeRecommendation>,
}

use tracing::debug;

use super::super::domain::{AcademicProfile, Category, CategoryScores};
use super::catalog::{
    category_for_program, strand_boosts, Weights, GRADE_BOOST_CATEGORIES, STRONG_GENERAL_AVERAGE,
};
use super::credentials::SubjectStrength;

/// Blend academic credentials into quiz scores: strand prior, interest ratings, then a small
/// grade boost. All three are cumulative.
pub fn apply_academic_boosts(scores: &CategoryScores, profile: &AcademicProfile) -> CategoryScores {
    let scores = apply_strand_prior(*scores, profile);
    let scores = apply_interest_ratings(scores, profile);
    apply_grade_boost(scores, profile)
}

fn apply_strand_prior(mut scores: CategoryScores, profile: &AcademicProfile) -> CategoryScores {
    let Some(strand) = profile.strand() else {
        return scores;
    };

    for (label, boost) in strand_boosts(strand) {
        if let Some(category) = Category::from_label(label) {
            scores.add(category, boost * Weights::STRAND_BOOST / 2.0);
        }
    }

    debug!(?strand, "applied strand prior");
    scores
}

fn apply_interest_ratings(mut scores: CategoryScores, profile: &AcademicProfile) -> CategoryScores {
    for (program, rating) in &profile.program_interest_ratings {
        let Some(rating) = rating.integer() else {
            continue;
        };
        // 1..=5 slider centred on 3.
        let delta = (rating - 3).clamp(-2, 2);
        if delta == 0 {
            continue;
        }
        let Some(category) = category_for_program(program) else {
            continue;
        };

        scores.add(category, delta as f64 * Weights::PROGRAM_INTEREST_RATING);
        debug!(%category, delta, "applied interest rating");
    }

    scores
}

fn apply_grade_boost(mut scores: CategoryScores, profile: &AcademicProfile) -> CategoryScores {
    let avg_strong = profile
        .general_average()
        .is_some_and(|average| average >= STRONG_GENERAL_AVERAGE);
    let strength = SubjectStrength::from_grades(&profile.subject_grades);

    if avg_strong || strength.math_or_science() {
        for category in GRADE_BOOST_CATEGORIES {
            scores.add(category, Weights::GRADE_BOOST);
        }
        debug!(avg_strong, ?strength, "applied grade boost");
    }

    scores
}

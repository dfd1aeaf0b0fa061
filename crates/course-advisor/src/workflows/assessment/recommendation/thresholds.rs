use tracing::debug;

use super::super::domain::{AcademicProfile, CategoryScores};
use super::catalog::{ThresholdRule, GWA_PENALTY, SUBJECT_PENALTY, THRESHOLDS};
use super::credentials::SubjectStrength;

/// Lower the score of categories whose eligibility expectations the student does not meet.
/// Without a profile the scores pass through untouched. No floor is applied.
pub fn apply_threshold_adjustments(
    scores: &CategoryScores,
    profile: Option<&AcademicProfile>,
) -> CategoryScores {
    let mut adjusted = *scores;
    let Some(profile) = profile else {
        return adjusted;
    };

    let gwa = profile.general_average();
    let strength = SubjectStrength::from_grades(&profile.subject_grades);

    for rule in &THRESHOLDS {
        let penalty = penalty_for(rule, gwa, strength);
        if penalty > 0.0 {
            adjusted.add(rule.category, -penalty);
            debug!(category = %rule.category, penalty, "threshold penalty applied");
        }
    }

    adjusted
}

fn penalty_for(rule: &ThresholdRule, gwa: Option<f64>, strength: SubjectStrength) -> f64 {
    let mut penalty = 0.0;

    if let (Some(minimum), Some(gwa)) = (rule.min_gwa, gwa) {
        if gwa < minimum {
            penalty += GWA_PENALTY;
        }
    }
    if rule.needs_math && !strength.math {
        penalty += SUBJECT_PENALTY;
    }
    if rule.needs_science && !strength.science {
        penalty += SUBJECT_PENALTY;
    }

    penalty
}

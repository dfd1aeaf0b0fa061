use std::collections::{BTreeMap, BTreeSet};

use super::common::*;
use crate::workflows::assessment::domain::{
    AcademicProfile, AssessmentSnapshot, Category, CategoryScores,
};
use crate::workflows::assessment::recommendation::{
    apply_academic_boosts, apply_threshold_adjustments, RecommendationEngine,
};

fn snapshot(
    statements: &[u8],
    answers: &[(u8, &str)],
    academic: Option<AcademicProfile>,
) -> AssessmentSnapshot {
    AssessmentSnapshot {
        part1_selected: statements.iter().copied().collect::<BTreeSet<_>>(),
        part2_answers: answers
            .iter()
            .map(|(id, answer)| (*id, answer.to_string()))
            .collect::<BTreeMap<_, _>>(),
        academic_profile: academic,
    }
}

#[test]
fn scenario_without_profile_ranks_computer_studies_first() {
    let engine = RecommendationEngine::new();

    let outcome = engine.recommend(&snapshot(&[4, 12], &[(4, "C")], None));

    let scores = &outcome.category_scores;
    assert_eq!(scores.get(Category::ComputerStudies), 4.0);
    assert_eq!(scores.get(Category::EngineeringAndTechnology), 1.0);
    for category in Category::ALL {
        if !matches!(
            category,
            Category::ComputerStudies | Category::EngineeringAndTechnology
        ) {
            assert_eq!(scores.get(category), 0.0, "{category}");
        }
    }

    let top = &outcome.recommended_top3[0];
    assert_eq!((top.rank, top.category, top.score), (1, Category::ComputerStudies, 4.0));

    let codes: Vec<_> = outcome
        .recommended_degrees
        .iter()
        .map(|degree| degree.code.as_str())
        .collect();
    assert_eq!(codes, vec!["BSIT", "BSCS", "BSCE"]);
    assert_eq!(outcome.recommended_degrees[2].score, 1.0);
}

#[test]
fn weak_profile_reorders_through_boosts_and_penalties() {
    let engine = RecommendationEngine::new();

    let outcome = engine.recommend(&snapshot(&[4, 12], &[(4, "C")], Some(weak_profile())));

    let scores = &outcome.category_scores;
    assert_eq!(scores.get(Category::ComputerStudies), -0.5);
    assert_eq!(scores.get(Category::EngineeringAndTechnology), -3.5);
    assert_eq!(scores.get(Category::ArtsAndSciences), 2.0);
    assert_eq!(scores.get(Category::TeacherEducation), 1.25);
    assert_eq!(scores.get(Category::Nursing), -4.5);
    assert_eq!(scores.get(Category::Accountancy), -4.5);

    let ranked: Vec<_> = outcome
        .recommended_top3
        .iter()
        .map(|item| item.category)
        .collect();
    assert_eq!(
        ranked,
        vec![
            Category::ArtsAndSciences,
            Category::TeacherEducation,
            Category::BusinessAdministration
        ]
    );

    let codes: Vec<_> = outcome
        .recommended_degrees
        .iter()
        .map(|degree| degree.code.as_str())
        .collect();
    assert_eq!(codes, vec!["BSPSY", "BAComm", "BEEd"]);
}

#[test]
fn empty_input_still_produces_complete_output() {
    let outcome = RecommendationEngine::new().recommend(&AssessmentSnapshot::default());

    assert_eq!(outcome.category_scores, CategoryScores::zeroed());
    assert_eq!(outcome.category_scores.iter().count(), Category::COUNT);
    assert_eq!(outcome.recommended_top3.len(), 3);
    assert_eq!(outcome.recommended_top3[0].category, Category::Accountancy);
    assert_eq!(outcome.recommended_degrees.len(), 3);
}

#[test]
fn repeated_runs_serialize_identically() {
    let engine = RecommendationEngine::new();
    let input = snapshot(&[1, 2, 6, 12, 14], &[(1, "b"), (7, "B"), (8, "D")], Some(weak_profile()));

    let first = serde_json::to_vec(&engine.recommend(&input)).expect("serializes");
    let second = serde_json::to_vec(&engine.recommend(&input)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn every_answer_correct_gives_two_points_each() {
    let answers = [
        (1, "B"),
        (2, "C"),
        (3, "B"),
        (4, "C"),
        (5, "B"),
        (6, "B"),
        (7, "B"),
        (8, "B"),
    ];
    let outcome = RecommendationEngine::new().recommend(&snapshot(&[], &answers, None));

    assert!(outcome
        .category_scores
        .iter()
        .all(|(_, value)| value == 2.0));
    assert!(outcome
        .recommended_top3
        .iter()
        .map(|item| item.rank)
        .eq(1..=3));
}

#[test]
fn strand_prior_alone_matches_documented_example() {
    let profile = AcademicProfile {
        strand: Some("STEM".to_string()),
        ..AcademicProfile::default()
    };

    let boosted = apply_academic_boosts(&CategoryScores::zeroed(), &profile);

    assert_eq!(boosted.get(Category::EngineeringAndTechnology), 2.0);
    assert_eq!(boosted.get(Category::ComputerStudies), 2.0);
}

#[test]
fn nursing_threshold_example() {
    let profile = AcademicProfile {
        general_average: Some(crate::workflows::assessment::domain::Numeric::Number(70.0)),
        ..AcademicProfile::default()
    };
    let scores = CategoryScores::zeroed().with_added(Category::Nursing, 5.0);

    let adjusted = apply_threshold_adjustments(&scores, Some(&profile));

    assert_eq!(adjusted.get(Category::Nursing), 0.5);
}

#[test]
fn penalties_apply_even_when_profile_carries_no_signals() {
    let outcome = RecommendationEngine::new().recommend(&snapshot(
        &[4],
        &[],
        Some(AcademicProfile::default()),
    ));

    // No grades on file: every math/science rule fails, GWA rules are skipped.
    assert_eq!(outcome.category_scores.get(Category::ComputerStudies), -0.5);
    assert_eq!(outcome.category_scores.get(Category::Nursing), -1.5);
    assert_eq!(outcome.recommended_top3[0].category, Category::ArtsAndSciences);
}

#[test]
fn caps_hold_for_strong_multi_signal_profiles() {
    let mut profile = weak_profile();
    profile.strand = Some("tvl".to_string());
    profile.general_average = Some(crate::workflows::assessment::domain::Numeric::Number(95.0));
    profile.subject_grades = vec![grade("Physics", 96.0), grade("Statistics and Math", 93.0)];

    let outcome = RecommendationEngine::new().recommend(&snapshot(
        &[1, 3, 4, 6, 9, 11, 12],
        &[(3, "B"), (6, "B")],
        Some(profile),
    ));

    assert!(outcome.recommended_degrees.len() <= 3);
    assert!(outcome.recommended_top3.len() <= 3);
    assert_eq!(outcome.recommended_top3[0].category, Category::EngineeringAndTechnology);
    assert_eq!(
        outcome.category_scores.get(Category::EngineeringAndTechnology),
        2.0 + 2.0 + 1.5 + 0.75
    );
}

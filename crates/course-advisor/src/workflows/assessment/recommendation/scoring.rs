use std::collections::{BTreeMap, BTreeSet};

use super::super::domain::CategoryScores;
use super::catalog::{QUIZ_KEY, QUIZ_POINTS, STATEMENTS, STATEMENT_POINTS};

/// Raw quiz scores: one point per checked statement a category claims, two per correct answer.
///
/// Statement numbers outside the catalog and unknown question ids simply contribute nothing.
pub fn score(
    part1_selected: &BTreeSet<u8>,
    part2_answers: &BTreeMap<u8, String>,
) -> CategoryScores {
    let mut scores = CategoryScores::zeroed();

    for (category, numbers) in STATEMENTS {
        let matched = numbers
            .iter()
            .filter(|number| part1_selected.contains(*number))
            .count();
        scores.add(category, matched as f64 * STATEMENT_POINTS);
    }

    for question in &QUIZ_KEY {
        let answered = part2_answers
            .get(&question.id)
            .map(|answer| answer.trim().to_uppercase());
        if answered.as_deref() == Some(question.correct) {
            scores.add(question.category, QUIZ_POINTS);
        }
    }

    scores
}

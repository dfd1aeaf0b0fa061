use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::advisor::ReviewRequest;
use super::domain::{AcademicProfile, Numeric, SubjectGrade};

/// Validation errors raised before anything reaches the engine or the profile store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("select at least one self-assessment statement")]
    NoStatementsSelected,
    #[error("self-assessment statement {0} is outside 1-15")]
    StatementOutOfRange(i64),
    #[error("answer the knowledge quiz before submitting")]
    NoQuizAnswers,
    #[error("answer to question '{question}' must be a single character")]
    MalformedAnswer { question: String },
    #[error("senior high school strand is required")]
    MissingStrand,
    #[error("general average must be a number between 60 and 100")]
    InvalidGeneralAverage,
    #[error("grade for '{subject}' must be a number between 0 and 100")]
    InvalidSubjectGrade { subject: String },
    #[error("at least one program interest rating is required")]
    NoInterestRatings,
    #[error("interest rating for '{program}' must be between 1 and 5 (found {rating})")]
    RatingOutOfRange { program: String, rating: i64 },
    #[error("career goals are required")]
    MissingCareerGoals,
    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("advisor degree #{index} needs a code and a name")]
    IncompleteAdvisorDegree { index: usize },
    #[error("student name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
}

const MAX_STATEMENT: i64 = 15;
const MAX_STRAND_LEN: usize = 64;
const MAX_SUBJECT_LEN: usize = 80;
const MAX_SKILL_LEN: usize = 64;
const MAX_CAREER_GOALS_LEN: usize = 2000;
const MAX_COMMENT_LEN: usize = 5000;
const MAX_DEGREE_CODE_LEN: usize = 32;
const MAX_DEGREE_NAME_LEN: usize = 255;
const MAX_TRACK_LEN: usize = 64;
const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;

/// Basic student details captured when a student first signs in or edits their profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Raw quiz submission as posted by the student portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub part1_selected: Vec<i64>,
    /// Question id (as sent, usually "1".."8") to answer letter.
    #[serde(default)]
    pub part2_answers: BTreeMap<String, String>,
}

/// Quiz answers after validation: statements deduplicated and sorted, answers uppercased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAssessment {
    pub part1_selected: BTreeSet<u8>,
    pub part2_answers: BTreeMap<u8, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectGradeInput {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub grade: Option<Numeric>,
}

/// Academic credentials form (strand, grades, skills, goals, interest sliders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsSubmission {
    pub shs_strand: String,
    pub shs_general_average: Numeric,
    #[serde(default)]
    pub subject_grades: Vec<SubjectGradeInput>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub career_goals: String,
    pub program_interest_ratings: BTreeMap<String, i64>,
}

/// Validated credentials split into the engine-facing profile and the descriptive extras.
#[derive(Debug, Clone, PartialEq)]
pub struct AcademicCredentials {
    pub profile: AcademicProfile,
    pub skills: Vec<String>,
    pub career_goals: String,
}

/// Upstream shape checks. The engine itself never rejects input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentGuard;

impl AssessmentGuard {
    pub fn normalize_assessment(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<NormalizedAssessment, IntakeViolation> {
        if submission.part1_selected.is_empty() {
            return Err(IntakeViolation::NoStatementsSelected);
        }

        let mut part1_selected = BTreeSet::new();
        for statement in submission.part1_selected {
            if !(1..=MAX_STATEMENT).contains(&statement) {
                return Err(IntakeViolation::StatementOutOfRange(statement));
            }
            part1_selected.insert(statement as u8);
        }

        if submission.part2_answers.is_empty() {
            return Err(IntakeViolation::NoQuizAnswers);
        }

        let mut part2_answers = BTreeMap::new();
        for (question, answer) in submission.part2_answers {
            let answer = answer.trim();
            if answer.chars().count() != 1 {
                return Err(IntakeViolation::MalformedAnswer { question });
            }
            // Keys that are not question numbers can never match the answer key.
            let Ok(id) = question.trim().parse::<u8>() else {
                continue;
            };
            part2_answers.insert(id, answer.to_uppercase());
        }

        Ok(NormalizedAssessment {
            part1_selected,
            part2_answers,
        })
    }

    pub fn normalize_credentials(
        &self,
        submission: CredentialsSubmission,
    ) -> Result<AcademicCredentials, IntakeViolation> {
        let strand = submission.shs_strand.trim().to_string();
        if strand.is_empty() {
            return Err(IntakeViolation::MissingStrand);
        }
        check_length("shs_strand", &strand, MAX_STRAND_LEN)?;

        let average = submission
            .shs_general_average
            .value()
            .filter(|average| (60.0..=100.0).contains(average))
            .ok_or(IntakeViolation::InvalidGeneralAverage)?;

        let mut subject_grades = Vec::new();
        for row in submission.subject_grades {
            let subject = row.subject.as_deref().map(str::trim).unwrap_or_default();
            let Some(grade) = row.grade else {
                continue;
            };
            if subject.is_empty() || matches!(&grade, Numeric::Text(raw) if raw.trim().is_empty())
            {
                continue;
            }
            check_length("subject", subject, MAX_SUBJECT_LEN)?;
            let value = grade
                .value()
                .filter(|value| (0.0..=100.0).contains(value))
                .ok_or_else(|| IntakeViolation::InvalidSubjectGrade {
                    subject: subject.to_string(),
                })?;
            subject_grades.push(SubjectGrade {
                subject: subject.to_string(),
                grade: Some(Numeric::Number(value)),
            });
        }

        for skill in &submission.skills {
            check_length("skill", skill, MAX_SKILL_LEN)?;
        }

        if submission.career_goals.trim().is_empty() {
            return Err(IntakeViolation::MissingCareerGoals);
        }
        check_length(
            "career_goals",
            &submission.career_goals,
            MAX_CAREER_GOALS_LEN,
        )?;

        if submission.program_interest_ratings.is_empty() {
            return Err(IntakeViolation::NoInterestRatings);
        }
        let mut program_interest_ratings = BTreeMap::new();
        for (program, rating) in submission.program_interest_ratings {
            if !(1..=5).contains(&rating) {
                return Err(IntakeViolation::RatingOutOfRange { program, rating });
            }
            program_interest_ratings.insert(program, Numeric::Number(rating as f64));
        }

        Ok(AcademicCredentials {
            profile: AcademicProfile {
                strand: Some(strand),
                general_average: Some(Numeric::Number(average)),
                subject_grades,
                program_interest_ratings,
            },
            skills: submission.skills,
            career_goals: submission.career_goals,
        })
    }

    /// Trimmed name and email; the email only needs a non-empty local part and domain.
    pub fn normalize_registration(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationRequest, IntakeViolation> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(IntakeViolation::MissingName);
        }
        check_length("name", name, MAX_NAME_LEN)?;

        let email = request.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !well_formed {
            return Err(IntakeViolation::InvalidEmail);
        }
        check_length("email", email, MAX_EMAIL_LEN)?;

        Ok(RegistrationRequest {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn validate_review(&self, request: &ReviewRequest) -> Result<(), IntakeViolation> {
        if let Some(comment) = &request.advisor_comment {
            check_length("advisor_comment", comment, MAX_COMMENT_LEN)?;
        }

        for (index, degree) in request.advisor_recommended_degrees.iter().enumerate() {
            if degree.code.trim().is_empty() || degree.name.trim().is_empty() {
                return Err(IntakeViolation::IncompleteAdvisorDegree { index: index + 1 });
            }
            check_length("degree code", &degree.code, MAX_DEGREE_CODE_LEN)?;
            check_length("degree name", &degree.name, MAX_DEGREE_NAME_LEN)?;
            if let Some(track) = &degree.track {
                check_length("degree track", track, MAX_TRACK_LEN)?;
            }
        }

        Ok(())
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), IntakeViolation> {
    if value.chars().count() > max {
        return Err(IntakeViolation::FieldTooLong { field, max });
    }
    Ok(())
}

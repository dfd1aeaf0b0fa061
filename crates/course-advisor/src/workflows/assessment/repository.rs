use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::advisor::{AdvisorReview, AdvisorStatus};
use super::domain::{
    AcademicProfile, CategoryScores, DegreeRecommendation, RankedCategory,
    StudentId,
};

/// Quiz answers plus the engine outputs persisted at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAssessment {
    pub part1_selected: BTreeSet<u8>,
    pub part2_answers: BTreeMap<u8, String>,
    pub recommended_top3: Vec<RankedCategory>,
    pub recommended_degrees: Vec<DegreeRecommendation>,
}

/// Repository record for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfileRecord {
    pub student_id: StudentId,
    pub name: String,
    pub email: String,
    pub academic: Option<AcademicProfile>,
    pub skills: Vec<String>,
    pub career_goals: Option<String>,
    pub assessment: Option<SavedAssessment>,
    pub advisor_review: Option<AdvisorReview>,
}

impl StudentProfileRecord {
    pub fn new(student_id: StudentId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            student_id,
            name: name.into(),
            email: email.into(),
            academic: None,
            skills: Vec::new(),
            career_goals: None,
            assessment: None,
            advisor_review: None,
        }
    }

    pub fn advisor_status(&self) -> AdvisorStatus {
        self.advisor_review
            .as_ref()
            .map(|review| review.status)
            .unwrap_or_default()
    }
}

/// Read model returned when a student reopens their assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentView {
    pub part1_selected: BTreeSet<u8>,
    pub part2_answers: BTreeMap<u8, String>,
    /// Raw quiz scores recomputed on read; academic adjustments are not included.
    pub scores: CategoryScores,
    pub recommended_top3: Vec<RankedCategory>,
    pub recommended_degrees: Vec<DegreeRecommendation>,
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfileRecord>, RepositoryError>;
    fn upsert(&self, record: StudentProfileRecord) -> Result<StudentProfileRecord, RepositoryError>;
    fn students(&self) -> Result<Vec<StudentProfileRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("student not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

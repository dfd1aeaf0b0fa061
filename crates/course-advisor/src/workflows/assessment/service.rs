use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::advisor::{build_roster, AdvisorId, AdvisorReview, AdvisorStats, ReviewRequest, RosterEntry};
use super::domain::{AssessmentSnapshot, StudentId};
use super::intake::{
    AssessmentGuard, AssessmentSubmission, CredentialsSubmission, IntakeViolation,
    RegistrationRequest,
};
use super::recommendation::{score, RecommendationEngine, RecommendationOutcome};
use super::repository::{
    AssessmentView, ProfileRepository, RepositoryError, SavedAssessment, StudentProfileRecord,
};
use crate::config::AdvisingConfig;

/// Service composing the intake guard, profile repository, and recommendation engine.
pub struct AssessmentService<R> {
    guard: AssessmentGuard,
    repository: Arc<R>,
    engine: RecommendationEngine,
    advising: AdvisingConfig,
}

impl<R> AssessmentService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, advising: AdvisingConfig) -> Self {
        Self {
            guard: AssessmentGuard,
            repository,
            engine: RecommendationEngine::new(),
            advising,
        }
    }

    /// Create the student's record, or refresh name/email when it already exists.
    pub fn register(
        &self,
        student_id: StudentId,
        name: &str,
        email: &str,
    ) -> Result<StudentProfileRecord, AssessmentServiceError> {
        let record = match self.repository.fetch(&student_id)? {
            Some(mut existing) => {
                existing.name = name.to_string();
                existing.email = email.to_string();
                existing
            }
            None => StudentProfileRecord::new(student_id, name, email),
        };
        Ok(self.repository.upsert(record)?)
    }

    /// Validated entry point for the basic-info form; creates the record on first save.
    pub fn save_basic_info(
        &self,
        student_id: StudentId,
        request: RegistrationRequest,
    ) -> Result<StudentProfileRecord, AssessmentServiceError> {
        let details = self.guard.normalize_registration(request)?;
        let record = self.register(student_id, &details.name, &details.email)?;
        info!(student = %record.student_id, "basic info saved");
        Ok(record)
    }

    pub fn save_academic_credentials(
        &self,
        student_id: &StudentId,
        submission: CredentialsSubmission,
    ) -> Result<StudentProfileRecord, AssessmentServiceError> {
        let credentials = self.guard.normalize_credentials(submission)?;
        let mut record = self.load(student_id)?;

        record.academic = Some(credentials.profile);
        record.skills = credentials.skills;
        record.career_goals = Some(credentials.career_goals);

        let stored = self.repository.upsert(record)?;
        info!(student = %student_id, "academic credentials saved");
        Ok(stored)
    }

    /// Validate and score a quiz submission, persisting the ranked outputs.
    pub fn submit_assessment(
        &self,
        student_id: &StudentId,
        submission: AssessmentSubmission,
    ) -> Result<RecommendationOutcome, AssessmentServiceError> {
        let normalized = self.guard.normalize_assessment(submission)?;
        let mut record = self.load(student_id)?;

        let snapshot = AssessmentSnapshot {
            part1_selected: normalized.part1_selected,
            part2_answers: normalized.part2_answers,
            academic_profile: record.academic.clone(),
        };
        let outcome = self.engine.recommend(&snapshot);

        record.assessment = Some(SavedAssessment {
            part1_selected: snapshot.part1_selected,
            part2_answers: snapshot.part2_answers,
            recommended_top3: outcome.recommended_top3.clone(),
            recommended_degrees: outcome.recommended_degrees.clone(),
        });
        self.repository.upsert(record)?;

        info!(
            student = %student_id,
            top = ?outcome.recommended_top3.first().map(|item| item.category),
            "assessment scored"
        );
        Ok(outcome)
    }

    /// Stored answers and outputs, with raw quiz scores recomputed for display.
    pub fn show_assessment(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<AssessmentView>, AssessmentServiceError> {
        let record = self.load(student_id)?;
        Ok(record.assessment.map(|saved| AssessmentView {
            scores: score(&saved.part1_selected, &saved.part2_answers),
            part1_selected: saved.part1_selected,
            part2_answers: saved.part2_answers,
            recommended_top3: saved.recommended_top3,
            recommended_degrees: saved.recommended_degrees,
        }))
    }

    /// Run the engine without touching storage.
    pub fn preview(&self, snapshot: &AssessmentSnapshot) -> RecommendationOutcome {
        self.engine.recommend(snapshot)
    }

    pub fn review(
        &self,
        student_id: &StudentId,
        advisor: AdvisorId,
        request: ReviewRequest,
    ) -> Result<AdvisorReview, AssessmentServiceError> {
        self.guard.validate_review(&request)?;
        let mut record = self.load(student_id)?;

        let review = AdvisorReview::from_request(request, advisor, Utc::now());
        record.advisor_review = Some(review.clone());
        self.repository.upsert(record)?;

        info!(
            student = %student_id,
            advisor = %review.reviewed_by.0,
            status = review.status.label(),
            "advisor review saved"
        );
        Ok(review)
    }

    /// Full stored record for the advisor detail view.
    pub fn student_detail(
        &self,
        student_id: &StudentId,
    ) -> Result<StudentProfileRecord, AssessmentServiceError> {
        self.load(student_id)
    }

    pub fn stats(&self) -> Result<AdvisorStats, AssessmentServiceError> {
        let students = self.repository.students()?;
        Ok(AdvisorStats::tally(&students))
    }

    pub fn roster(&self, query: Option<&str>) -> Result<Vec<RosterEntry>, AssessmentServiceError> {
        let students = self.repository.students()?;
        Ok(build_roster(&students, query, self.advising.roster_limit))
    }

    fn load(&self, student_id: &StudentId) -> Result<StudentProfileRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(student_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

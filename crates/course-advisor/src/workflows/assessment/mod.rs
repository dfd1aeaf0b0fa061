//! Student assessment intake, the category recommendation engine, and the advisor review layer.

pub mod advisor;
pub mod domain;
pub mod intake;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use advisor::{
    assessment_score_preview, write_roster_csv, AdvisorDegree, AdvisorId, AdvisorReview,
    AdvisorStats, AdvisorStatus, ReviewRequest, RosterEntry,
};
pub use domain::{
    AcademicProfile, AssessmentSnapshot, Category, CategoryScores, DegreeRecommendation, Numeric,
    RankedCategory, Strand, StudentId, SubjectGrade,
};
pub use intake::{
    AssessmentGuard, AssessmentSubmission, CredentialsSubmission, IntakeViolation,
    NormalizedAssessment, RegistrationRequest, SubjectGradeInput,
};
pub use recommendation::{
    apply_academic_boosts, apply_threshold_adjustments, degrees_from_top, score, top_n,
    RecommendationEngine, RecommendationOutcome, RECOMMENDATION_SLOTS,
};
pub use repository::{
    AssessmentView, ProfileRepository, RepositoryError, SavedAssessment, StudentProfileRecord,
};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::AdvisingConfig;
use crate::workflows::assessment::domain::{AcademicProfile, Numeric, StudentId, SubjectGrade};
use crate::workflows::assessment::intake::{
    AssessmentSubmission, CredentialsSubmission, SubjectGradeInput,
};
use crate::workflows::assessment::repository::{
    ProfileRepository, RepositoryError, StudentProfileRecord,
};
use crate::workflows::assessment::{assessment_router, AssessmentService};

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<StudentId, StudentProfileRecord>>>,
}

impl ProfileRepository for MemoryRepository {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(id).cloned())
    }

    fn upsert(
        &self,
        record: StudentProfileRecord,
    ) -> Result<StudentProfileRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        guard.insert(record.student_id.clone(), record.clone());
        Ok(record)
    }

    fn students(&self) -> Result<Vec<StudentProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn fetch(&self, _id: &StudentId) -> Result<Option<StudentProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(
        &self,
        _record: StudentProfileRecord,
    ) -> Result<StudentProfileRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn students(&self) -> Result<Vec<StudentProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(repository.clone(), AdvisingConfig::default());
    (service, repository)
}

pub(super) fn registered_service(
    student: u64,
) -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let (service, repository) = build_service();
    service
        .register(StudentId(student), "Andrea Santos", "andrea@example.edu")
        .expect("registration succeeds");
    (service, repository)
}

pub(super) fn submission(statements: &[i64], answers: &[(&str, &str)]) -> AssessmentSubmission {
    AssessmentSubmission {
        part1_selected: statements.to_vec(),
        part2_answers: answers
            .iter()
            .map(|(question, answer)| (question.to_string(), answer.to_string()))
            .collect(),
    }
}

pub(super) fn credentials(strand: &str, average: f64) -> CredentialsSubmission {
    let mut ratings = BTreeMap::new();
    ratings.insert("Computer Studies".to_string(), 3);
    CredentialsSubmission {
        shs_strand: strand.to_string(),
        shs_general_average: Numeric::Number(average),
        subject_grades: vec![
            SubjectGradeInput {
                subject: Some("General Mathematics".to_string()),
                grade: Some(Numeric::Number(90.0)),
            },
            SubjectGradeInput {
                subject: Some("Earth Science".to_string()),
                grade: Some(Numeric::Text("87".to_string())),
            },
        ],
        skills: vec!["Python".to_string()],
        career_goals: "Build software for local clinics.".to_string(),
        program_interest_ratings: ratings,
    }
}

pub(super) fn grade(subject: &str, value: f64) -> SubjectGrade {
    SubjectGrade {
        subject: subject.to_string(),
        grade: Some(Numeric::Number(value)),
    }
}

pub(super) fn weak_profile() -> AcademicProfile {
    AcademicProfile {
        strand: Some("HUMSS".to_string()),
        general_average: Some(Numeric::Number(78.0)),
        subject_grades: vec![grade("Mathematics", 75.0)],
        program_interest_ratings: BTreeMap::new(),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

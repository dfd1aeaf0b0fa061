use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::advisor::{AdvisorId, ReviewRequest};
use super::domain::{AssessmentSnapshot, StudentId};
use super::intake::{AssessmentSubmission, CredentialsSubmission, RegistrationRequest};
use super::repository::{ProfileRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Header carrying the authenticated advisor's identifier, set by the auth gateway.
pub const ADVISOR_HEADER: &str = "x-advisor-id";

/// Router builder exposing the student and advisor endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(preview_handler::<R>))
        .route(
            "/api/v1/students/:student_id/assessment",
            get(show_assessment_handler::<R>).put(submit_assessment_handler::<R>),
        )
        .route(
            "/api/v1/students/:student_id/profile",
            put(basic_info_handler::<R>),
        )
        .route(
            "/api/v1/students/:student_id/credentials",
            put(credentials_handler::<R>),
        )
        .route("/api/v1/advisor/students", get(roster_handler::<R>))
        .route(
            "/api/v1/advisor/students/:student_id",
            get(student_detail_handler::<R>),
        )
        .route("/api/v1/advisor/stats", get(stats_handler::<R>))
        .route(
            "/api/v1/advisor/students/:student_id/review",
            put(review_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterQuery {
    #[serde(default)]
    pub(crate) q: Option<String>,
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Json(snapshot): Json<AssessmentSnapshot>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let outcome = service.preview(&snapshot);
    (StatusCode::OK, Json(outcome)).into_response()
}

pub(crate) async fn submit_assessment_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(student_id): Path<u64>,
    Json(submission): Json<AssessmentSubmission>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.submit_assessment(&StudentId(student_id), submission) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn show_assessment_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(student_id): Path<u64>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.show_assessment(&StudentId(student_id)) {
        Ok(view) => (StatusCode::OK, Json(json!({ "assessment": view }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn basic_info_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(student_id): Path<u64>,
    Json(request): Json<RegistrationRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.save_basic_info(StudentId(student_id), request) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn credentials_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(student_id): Path<u64>,
    Json(submission): Json<CredentialsSubmission>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.save_academic_credentials(&StudentId(student_id), submission) {
        Ok(record) => (StatusCode::OK, Json(json!({ "academic": record.academic }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(student_id): Path<u64>,
    headers: HeaderMap,
    Json(request): Json<ReviewRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let Some(advisor) = headers
        .get(ADVISOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    else {
        let payload = json!({ "error": format!("missing {ADVISOR_HEADER} header") });
        return (StatusCode::UNAUTHORIZED, Json(payload)).into_response();
    };

    match service.review(&StudentId(student_id), AdvisorId(advisor.to_string()), request) {
        Ok(review) => (StatusCode::OK, Json(review)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn roster_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.roster(query.q.as_deref()) {
        Ok(students) => (StatusCode::OK, Json(json!({ "students": students }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_detail_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(student_id): Path<u64>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.student_detail(&StudentId(student_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(State(service): State<Arc<AssessmentService<R>>>) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

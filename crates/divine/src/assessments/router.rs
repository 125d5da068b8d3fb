use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AssessmentDepth, MemberId, Question, ResponseSet};
use super::repository::ProfileRepository;
use super::service::{AssessmentService, AssessmentServiceError};

/// Body accepted by the stateless scoring endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub responses: ResponseSet,
}

/// Body accepted when a member submits an assessment against the question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub responses: ResponseSet,
}

/// Router builder exposing HTTP endpoints for assessments and member profiles.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:depth/questions",
            get(questions_handler::<R>),
        )
        .route("/api/v1/scores", post(score_handler::<R>))
        .route(
            "/api/v1/members/:member_id/assessments/:depth",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/members/:member_id/profile",
            get(profile_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(depth): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let depth = match depth.parse::<AssessmentDepth>() {
        Ok(depth) => depth,
        Err(err) => return error_response(StatusCode::NOT_FOUND, err.to_string()),
    };

    let questions = service.questions(depth);
    let payload = json!({
        "depth": depth.label(),
        "count": questions.len(),
        "questions": questions,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    match service.score(&request.questions, &request.responses) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((member_id, depth)): Path<(String, String)>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let depth = match depth.parse::<AssessmentDepth>() {
        Ok(depth) => depth,
        Err(err) => return error_response(StatusCode::NOT_FOUND, err.to_string()),
    };

    match service.submit(MemberId(member_id), depth, &request.responses) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(member_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let member_id = MemberId(member_id);
    match service.latest(&member_id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("no spiritual gifts profile for member '{}'", member_id.0),
        ),
        Err(err) => service_error_response(err),
    }
}

fn service_error_response(err: AssessmentServiceError) -> Response {
    let status = match err {
        AssessmentServiceError::Scoring(_) | AssessmentServiceError::Session(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssessmentServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{ResponseId, SessionId};
use super::repository::ResponseRepository;
use super::service::{NavigatorService, NavigatorServiceError, QuestionnaireSubmission};
use super::steps::{NavigatorStep, StepSubmission};
use crate::error::{error_response, validation_response, ErrorKind};
use crate::pagination::PageQuery;
use crate::workflows::directory::repository::DirectoryRepository;

/// Router builder exposing the navigator intake and results endpoints.
pub fn navigator_router<R, D>(service: Arc<NavigatorService<R, D>>) -> Router
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/navigator/steps/:step/validate",
            post(validate_step_handler::<R, D>),
        )
        .route("/api/v1/navigator/responses", post(submit_handler::<R, D>))
        .route(
            "/api/v1/navigator/responses/:response_id/results",
            get(results_handler::<R, D>),
        )
        .with_state(service)
}

pub(crate) async fn validate_step_handler<R, D>(
    State(service): State<Arc<NavigatorService<R, D>>>,
    Path(step): Path<u8>,
    Json(submission): Json<StepSubmission>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    let Some(step) = NavigatorStep::from_number(step) else {
        return error_response(
            ErrorKind::NotFound,
            format!("navigator has no step {step}; steps run from 1 to 7"),
        );
    };

    match service.validate(step, &submission) {
        Ok(answer) => (StatusCode::OK, Json(json!({ "answer": answer }))).into_response(),
        Err(errors) => validation_response(&errors),
    }
}

pub(crate) async fn submit_handler<R, D>(
    State(service): State<Arc<NavigatorService<R, D>>>,
    Json(submission): Json<QuestionnaireSubmission>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    let answers = match service.collect_answers(&submission.steps) {
        Ok(answers) => answers,
        Err(errors) => return validation_response(&errors),
    };
    let session_id = submission.session_id.unwrap_or_else(SessionId::generate);

    match service.submit(answers, session_id) {
        Ok(response) => {
            let payload = json!({
                "id": response.id,
                "session_id": response.session_id,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => service_error_response(&err),
    }
}

pub(crate) async fn results_handler<R, D>(
    State(service): State<Arc<NavigatorService<R, D>>>,
    Path(response_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    let id = ResponseId(response_id);
    match service.results_for(&id, query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => service_error_response(&err),
    }
}

fn service_error_response(err: &NavigatorServiceError) -> Response {
    match err {
        NavigatorServiceError::ResponseNotFound(_) => error_response(err.kind(), err.to_string()),
        _ => error_response(err.kind(), err.user_message()),
    }
}

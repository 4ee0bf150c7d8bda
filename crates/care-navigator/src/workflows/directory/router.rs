use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::domain::ListingId;
use super::repository::DirectoryRepository;
use super::service::{DirectoryQuery, DirectoryService, DirectoryServiceError};
use crate::error::{error_response, validation_response};
use crate::workflows::inbox::repository::InboxRepository;

/// Router builder for the public directory.
pub fn directory_router<D, I>(service: Arc<DirectoryService<D, I>>) -> Router
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    Router::new()
        .route("/api/v1/directory", get(search_handler::<D, I>))
        .route("/api/v1/directory/:listing_id", get(profile_handler::<D, I>))
        .with_state(service)
}

pub(crate) async fn search_handler<D, I>(
    State(service): State<Arc<DirectoryService<D, I>>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.search(&query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn profile_handler<D, I>(
    State(service): State<Arc<DirectoryService<D, I>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.profile(&ListingId(listing_id)) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

fn directory_error_response(err: DirectoryServiceError) -> Response {
    match err {
        DirectoryServiceError::Validation(errors) => validation_response(&errors),
        other => error_response(other.kind(), other.to_string()),
    }
}

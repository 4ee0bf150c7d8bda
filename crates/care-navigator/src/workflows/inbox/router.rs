use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::domain::{ClaimRequest, ContactRequest, ReviewRequest};
use super::repository::{InboxRepository, Notifier};
use super::service::{InboxService, InboxServiceError};
use crate::error::{error_response, validation_response};
use crate::pagination::PageQuery;
use crate::workflows::directory::domain::ListingId;
use crate::workflows::directory::repository::DirectoryRepository;

/// Router builder for submissions made against a directory listing.
pub fn inbox_router<D, I, N>(service: Arc<InboxService<D, I, N>>) -> Router
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/directory/:listing_id/contact",
            post(contact_handler::<D, I, N>),
        )
        .route(
            "/api/v1/directory/:listing_id/reviews",
            post(review_handler::<D, I, N>).get(reviews_handler::<D, I, N>),
        )
        .route(
            "/api/v1/directory/:listing_id/claims",
            post(claim_handler::<D, I, N>),
        )
        .with_state(service)
}

pub(crate) async fn contact_handler<D, I, N>(
    State(service): State<Arc<InboxService<D, I, N>>>,
    Path(listing_id): Path<String>,
    Json(request): Json<ContactRequest>,
) -> Response
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
    N: Notifier + 'static,
{
    match service.submit_contact(&ListingId(listing_id), request) {
        Ok(message) => (
            StatusCode::CREATED,
            Json(json!({ "id": message.id, "listing_id": message.listing_id })),
        )
            .into_response(),
        Err(err) => inbox_error_response(err),
    }
}

pub(crate) async fn review_handler<D, I, N>(
    State(service): State<Arc<InboxService<D, I, N>>>,
    Path(listing_id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Response
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
    N: Notifier + 'static,
{
    match service.submit_review(&ListingId(listing_id), request) {
        Ok(review) => (
            StatusCode::CREATED,
            Json(json!({ "id": review.id, "status": review.status })),
        )
            .into_response(),
        Err(err) => inbox_error_response(err),
    }
}

pub(crate) async fn reviews_handler<D, I, N>(
    State(service): State<Arc<InboxService<D, I, N>>>,
    Path(listing_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
    N: Notifier + 'static,
{
    match service.published_reviews(&ListingId(listing_id), query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => inbox_error_response(err),
    }
}

pub(crate) async fn claim_handler<D, I, N>(
    State(service): State<Arc<InboxService<D, I, N>>>,
    Path(listing_id): Path<String>,
    Json(request): Json<ClaimRequest>,
) -> Response
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
    N: Notifier + 'static,
{
    match service.submit_claim(&ListingId(listing_id), request) {
        Ok(claim) => (
            StatusCode::CREATED,
            Json(json!({ "id": claim.id, "status": claim.status })),
        )
            .into_response(),
        Err(err) => inbox_error_response(err),
    }
}

fn inbox_error_response(err: InboxServiceError) -> Response {
    match err {
        InboxServiceError::Validation(errors) => validation_response(&errors),
        other => error_response(other.kind(), other.to_string()),
    }
}

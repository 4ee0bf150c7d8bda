use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};

use super::service::{
    AdminService, AdminServiceError, ClaimDecision, ContactsQuery, ListingStatusUpdate,
    ListingsQuery, ResponsesQuery, ReviewDecision, StatusQuery,
};
use crate::error::{error_response, validation_response};
use crate::workflows::directory::domain::ListingId;
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::inbox::domain::{ClaimId, ClaimStatus, ReviewId, ReviewStatus};
use crate::workflows::inbox::repository::InboxRepository;
use crate::workflows::navigator::repository::ResponseRepository;

/// Router builder for the back-office panels. Mount behind the
/// authentication layer.
pub fn admin_router<R, D, I>(service: Arc<AdminService<R, D, I>>) -> Router
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/responses",
            get(responses_handler::<R, D, I>),
        )
        .route(
            "/api/v1/admin/responses/analytics",
            get(analytics_handler::<R, D, I>),
        )
        .route("/api/v1/admin/listings", get(listings_handler::<R, D, I>))
        .route(
            "/api/v1/admin/listings/:listing_id/status",
            patch(listing_status_handler::<R, D, I>),
        )
        .route("/api/v1/admin/contacts", get(contacts_handler::<R, D, I>))
        .route("/api/v1/admin/claims", get(claims_handler::<R, D, I>))
        .route(
            "/api/v1/admin/claims/:claim_id/resolve",
            post(resolve_claim_handler::<R, D, I>),
        )
        .route("/api/v1/admin/reviews", get(reviews_handler::<R, D, I>))
        .route(
            "/api/v1/admin/reviews/:review_id/moderate",
            post(moderate_review_handler::<R, D, I>),
        )
        .with_state(service)
}

pub(crate) async fn responses_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Query(query): Query<ResponsesQuery>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.responses(&query.filter(), query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn analytics_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Query(query): Query<ResponsesQuery>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.response_analytics(&query.filter()) {
        Ok(analytics) => (StatusCode::OK, Json(analytics)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn listings_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Query(query): Query<ListingsQuery>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.listings(&query.filter(), query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn listing_status_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Path(listing_id): Path<String>,
    Json(update): Json<ListingStatusUpdate>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.set_listing_status(&ListingId(listing_id), update) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn contacts_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Query(query): Query<ContactsQuery>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.contacts(query.listing_id.as_ref(), query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn claims_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Query(query): Query<StatusQuery<ClaimStatus>>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.claims(query.status, query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn resolve_claim_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Path(claim_id): Path<String>,
    Json(decision): Json<ClaimDecision>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.resolve_claim(&ClaimId(claim_id), decision) {
        Ok(claim) => (StatusCode::OK, Json(claim)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn reviews_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Query(query): Query<StatusQuery<ReviewStatus>>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.reviews(query.status, query.page_request()) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

pub(crate) async fn moderate_review_handler<R, D, I>(
    State(service): State<Arc<AdminService<R, D, I>>>,
    Path(review_id): Path<String>,
    Json(decision): Json<ReviewDecision>,
) -> Response
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    match service.moderate_review(&ReviewId(review_id), decision) {
        Ok(review) => (StatusCode::OK, Json(review)).into_response(),
        Err(err) => admin_error_response(err),
    }
}

fn admin_error_response(err: AdminServiceError) -> Response {
    match err {
        AdminServiceError::Validation(errors) => validation_response(&errors),
        other => error_response(other.kind(), other.to_string()),
    }
}

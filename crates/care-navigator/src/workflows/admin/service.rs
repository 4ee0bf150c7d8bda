use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::analytics::ResponseAnalytics;
use crate::error::ErrorKind;
use crate::pagination::{Page, PageQuery, PageRequest, PagingPolicy};
use crate::workflows::directory::domain::{Listing, ListingId, ListingKind};
use crate::workflows::directory::filter::{ListingFilter, ListingPredicate};
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::inbox::domain::{
    Claim, ClaimId, ClaimStatus, ContactMessage, Review, ReviewId, ReviewStatus,
};
use crate::workflows::inbox::repository::InboxRepository;
use crate::workflows::navigator::domain::QuestionnaireResponse;
use crate::workflows::navigator::repository::{ResponseFilter, ResponseRepository};
use crate::workflows::navigator::validation::FieldErrors;
use crate::workflows::navigator::vocabulary::{Concern, Urgency};
use crate::workflows::repository::RepositoryError;

/// Query string for the response panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesQuery {
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub primary_concern: Option<Concern>,
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ResponsesQuery {
    pub fn filter(&self) -> ResponseFilter {
        ResponseFilter {
            urgency: self.urgency,
            primary_concern: self.primary_concern,
            since: self.since,
            until: self.until,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

/// Query string for the listing panel. Unlike the public search, inactive
/// and unverified listings are included unless filtered out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsQuery {
    #[serde(default)]
    pub kind: Option<ListingKind>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub claimed: Option<bool>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListingsQuery {
    pub fn filter(&self) -> ListingFilter {
        let text = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| ListingPredicate::NameContains(text.to_string()));

        ListingFilter::new()
            .and_if(self.kind.map(ListingPredicate::Kind))
            .and_if(self.active.map(ListingPredicate::Active))
            .and_if(self.verified.map(ListingPredicate::Verified))
            .and_if(self.claimed.map(ListingPredicate::Claimed))
            .and_if(text)
    }

    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

/// Query string for the claim and review panels.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery<S> {
    pub status: Option<S>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl<S> StatusQuery<S> {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

/// Query string for the contact message panel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactsQuery {
    #[serde(default)]
    pub listing_id: Option<ListingId>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ContactsQuery {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

fn page_request(page: Option<u32>, limit: Option<u32>) -> PageRequest {
    PageQuery { page, limit }.page_request()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStatusUpdate {
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDecision {
    pub approve: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDecision {
    pub publish: bool,
}

/// Back-office panels over responses, listings, contact messages, claims, and reviews.
///
/// Callers are expected to sit behind the authentication layer; the service
/// itself performs no access checks.
pub struct AdminService<R, D, I> {
    responses: Arc<R>,
    directory: Arc<D>,
    inbox: Arc<I>,
    paging: PagingPolicy,
}

impl<R, D, I> AdminService<R, D, I>
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    pub fn new(responses: Arc<R>, directory: Arc<D>, inbox: Arc<I>, paging: PagingPolicy) -> Self {
        Self {
            responses,
            directory,
            inbox,
            paging,
        }
    }

    /// Matching responses, newest first.
    pub fn responses(
        &self,
        filter: &ResponseFilter,
        request: PageRequest,
    ) -> Result<Page<QuestionnaireResponse>, AdminServiceError> {
        let mut responses = self.responses.list(filter)?;
        responses.reverse();
        Ok(self.paging.paginate(responses, request))
    }

    pub fn response_analytics(
        &self,
        filter: &ResponseFilter,
    ) -> Result<ResponseAnalytics, AdminServiceError> {
        let responses = self.responses.list(filter)?;
        Ok(ResponseAnalytics::from_responses(&responses))
    }

    pub fn listings(
        &self,
        filter: &ListingFilter,
        request: PageRequest,
    ) -> Result<Page<Listing>, AdminServiceError> {
        let listings = self.directory.query(filter)?;
        Ok(self.paging.paginate(listings, request))
    }

    pub fn set_listing_status(
        &self,
        id: &ListingId,
        update: ListingStatusUpdate,
    ) -> Result<Listing, AdminServiceError> {
        if update.active.is_none() && update.verified.is_none() {
            return Err(AdminServiceError::Validation(FieldErrors::single(
                "status",
                "provide active, verified, or both",
            )));
        }

        let mut listing = self.listing(id)?;
        if let Some(active) = update.active {
            listing.active = active;
        }
        if let Some(verified) = update.verified {
            listing.verified = verified;
        }
        self.directory.update(listing.clone())?;
        info!(
            listing_id = %listing.id,
            active = listing.active,
            verified = listing.verified,
            "listing status updated"
        );
        Ok(listing)
    }

    pub fn claims(
        &self,
        status: Option<ClaimStatus>,
        request: PageRequest,
    ) -> Result<Page<Claim>, AdminServiceError> {
        let claims = self.inbox.claims(None, status)?;
        Ok(self.paging.paginate(claims, request))
    }

    /// Approving hands the listing to the claimant and rejects every other
    /// pending claim on it; either decision is final.
    pub fn resolve_claim(
        &self,
        id: &ClaimId,
        decision: ClaimDecision,
    ) -> Result<Claim, AdminServiceError> {
        let mut claim = self
            .inbox
            .fetch_claim(id)?
            .ok_or_else(|| AdminServiceError::ClaimNotFound(id.clone()))?;
        if claim.status != ClaimStatus::Pending {
            return Err(AdminServiceError::ClaimNotPending(claim.id));
        }

        let resolved_at = Utc::now();
        claim.resolved_at = Some(resolved_at);
        if !decision.approve {
            claim.status = ClaimStatus::Rejected;
            self.inbox.update_claim(claim.clone())?;
            info!(claim_id = %claim.id, listing_id = %claim.listing_id, "listing claim rejected");
            return Ok(claim);
        }

        let mut listing = self.listing(&claim.listing_id)?;
        if listing.claimed_by.is_some() {
            return Err(AdminServiceError::AlreadyClaimed(listing.id));
        }
        listing.claimed_by = Some(claim.user_id.clone());
        self.directory.update(listing.clone())?;

        claim.status = ClaimStatus::Approved;
        if let Err(err) = self.inbox.update_claim(claim.clone()) {
            listing.claimed_by = None;
            if let Err(rollback) = self.directory.update(listing) {
                warn!(
                    claim_id = %claim.id,
                    listing_id = %claim.listing_id,
                    error = %rollback,
                    "listing ownership could not be released after a failed claim update"
                );
            }
            return Err(err.into());
        }

        let superseded = self.reject_competing_claims(&claim, resolved_at);
        info!(
            claim_id = %claim.id,
            listing_id = %claim.listing_id,
            superseded,
            "listing claim approved"
        );
        Ok(claim)
    }

    /// Best effort: the approval already stands, so failures are only logged
    /// and the leftover claims stay pending until resolved by hand.
    fn reject_competing_claims(&self, approved: &Claim, resolved_at: DateTime<Utc>) -> usize {
        let listing_id = &approved.listing_id;
        let competing = match self.inbox.claims(Some(listing_id), Some(ClaimStatus::Pending)) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(listing_id = %listing_id, error = %err, "competing claims not loaded");
                return 0;
            }
        };

        let mut rejected = 0;
        for mut claim in competing.into_iter().filter(|claim| claim.id != approved.id) {
            claim.status = ClaimStatus::Rejected;
            claim.resolved_at = Some(resolved_at);
            let claim_id = claim.id.clone();
            match self.inbox.update_claim(claim) {
                Ok(()) => rejected += 1,
                Err(err) => {
                    warn!(claim_id = %claim_id, error = %err, "competing claim not rejected")
                }
            }
        }
        rejected
    }

    /// Contact messages, newest first, optionally for one listing.
    pub fn contacts(
        &self,
        listing_id: Option<&ListingId>,
        request: PageRequest,
    ) -> Result<Page<ContactMessage>, AdminServiceError> {
        let mut contacts = self.inbox.contacts(listing_id)?;
        contacts.reverse();
        Ok(self.paging.paginate(contacts, request))
    }

    pub fn reviews(
        &self,
        status: Option<ReviewStatus>,
        request: PageRequest,
    ) -> Result<Page<Review>, AdminServiceError> {
        let reviews = self.inbox.reviews(None, status)?;
        Ok(self.paging.paginate(reviews, request))
    }

    pub fn moderate_review(
        &self,
        id: &ReviewId,
        decision: ReviewDecision,
    ) -> Result<Review, AdminServiceError> {
        let mut review = self
            .inbox
            .fetch_review(id)?
            .ok_or_else(|| AdminServiceError::ReviewNotFound(id.clone()))?;
        if review.status != ReviewStatus::Pending {
            return Err(AdminServiceError::ReviewNotPending(review.id));
        }

        review.status = if decision.publish {
            ReviewStatus::Published
        } else {
            ReviewStatus::Rejected
        };
        self.inbox.update_review(review.clone())?;
        info!(review_id = %review.id, status = ?review.status, "review moderated");
        Ok(review)
    }

    fn listing(&self, id: &ListingId) -> Result<Listing, AdminServiceError> {
        self.directory
            .fetch(id)?
            .ok_or_else(|| AdminServiceError::ListingNotFound(id.clone()))
    }
}

/// Error raised by the back-office service.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("request is invalid: {0}")]
    Validation(FieldErrors),
    #[error("listing {0} not found")]
    ListingNotFound(ListingId),
    #[error("claim {0} not found")]
    ClaimNotFound(ClaimId),
    #[error("review {0} not found")]
    ReviewNotFound(ReviewId),
    #[error("claim {0} has already been resolved")]
    ClaimNotPending(ClaimId),
    #[error("review {0} has already been moderated")]
    ReviewNotPending(ReviewId),
    #[error("listing {0} has already been claimed")]
    AlreadyClaimed(ListingId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AdminServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminServiceError::Validation(_) => ErrorKind::Validation,
            AdminServiceError::ListingNotFound(_)
            | AdminServiceError::ClaimNotFound(_)
            | AdminServiceError::ReviewNotFound(_) => ErrorKind::NotFound,
            AdminServiceError::ClaimNotPending(_)
            | AdminServiceError::ReviewNotPending(_)
            | AdminServiceError::AlreadyClaimed(_) => ErrorKind::Conflict,
            AdminServiceError::Repository(err) => err.kind(),
        }
    }
}

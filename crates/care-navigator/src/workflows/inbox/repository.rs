use super::domain::{
    Claim, ClaimId, ClaimStatus, ContactMessage, Notification, Review, ReviewId, ReviewStatus,
};
use crate::workflows::directory::domain::ListingId;
use crate::workflows::repository::RepositoryError;

/// Storage for messages, reviews, and claims submitted against listings.
pub trait InboxRepository: Send + Sync {
    fn insert_contact(&self, message: ContactMessage) -> Result<ContactMessage, RepositoryError>;
    fn contacts(&self, listing_id: Option<&ListingId>)
        -> Result<Vec<ContactMessage>, RepositoryError>;

    fn insert_review(&self, review: Review) -> Result<Review, RepositoryError>;
    fn update_review(&self, review: Review) -> Result<(), RepositoryError>;
    fn fetch_review(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError>;
    /// Reviews in submission order.
    fn reviews(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, RepositoryError>;

    fn insert_claim(&self, claim: Claim) -> Result<Claim, RepositoryError>;
    fn update_claim(&self, claim: Claim) -> Result<(), RepositoryError>;
    fn fetch_claim(&self, id: &ClaimId) -> Result<Option<Claim>, RepositoryError>;
    /// Claims in submission order.
    fn claims(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, RepositoryError>;
}

/// Best-effort outbound e-mail hook.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

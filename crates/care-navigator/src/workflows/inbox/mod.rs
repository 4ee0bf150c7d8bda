//! Contact, review, and claim submissions made against directory listings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Claim, ClaimId, ClaimRequest, ClaimStatus, ContactId, ContactMessage, ContactRequest,
    Notification, Review, ReviewId, ReviewRequest, ReviewStatus,
};
pub use repository::{InboxRepository, Notifier, NotifyError};
pub use router::inbox_router;
pub use service::{InboxService, InboxServiceError};

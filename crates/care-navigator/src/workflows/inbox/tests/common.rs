use std::sync::Arc;

pub(super) use crate::workflows::test_support::*;

use crate::pagination::PagingPolicy;
use crate::workflows::directory::domain::Listing;
use crate::workflows::inbox::domain::{ClaimRequest, ContactRequest, ReviewRequest};
use crate::workflows::inbox::repository::Notifier;
use crate::workflows::inbox::InboxService;

pub(super) fn listings() -> Vec<Listing> {
    let mut claimed = listing("claimed", "Claimed Practice");
    claimed.claimed_by = Some("user-owner".to_string());
    let mut inactive = listing("inactive", "Retired Practice");
    inactive.active = false;
    vec![listing("harbor", "Harbor Counseling"), claimed, inactive]
}

pub(super) fn service_with<N: Notifier + 'static>(
    notifier: Arc<N>,
) -> (
    InboxService<MemoryDirectory, MemoryInbox, N>,
    Arc<MemoryDirectory>,
    Arc<MemoryInbox>,
) {
    let directory = Arc::new(MemoryDirectory::with(listings()));
    let inbox = Arc::new(MemoryInbox::default());
    let service = InboxService::new(
        directory.clone(),
        inbox.clone(),
        notifier,
        PagingPolicy::default(),
    );
    (service, directory, inbox)
}

pub(super) fn contact() -> ContactRequest {
    ContactRequest {
        name: Some("Jordan".to_string()),
        email: Some("jordan@example.org".to_string()),
        phone: None,
        message: Some("Do you have evening availability?".to_string()),
    }
}

pub(super) fn review(rating: i64) -> ReviewRequest {
    ReviewRequest {
        rating: Some(rating),
        author_name: Some("  ".to_string()),
        body: Some("Warm and practical.".to_string()),
    }
}

pub(super) fn claim(user_id: &str) -> ClaimRequest {
    ClaimRequest {
        user_id: Some(user_id.to_string()),
        name: Some("Dr. Rivera".to_string()),
        email: Some("rivera@example.org".to_string()),
        message: None,
    }
}

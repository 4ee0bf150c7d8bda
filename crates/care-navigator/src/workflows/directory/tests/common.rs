use std::sync::Arc;

use chrono::Utc;

pub(super) use crate::workflows::test_support::*;

use crate::pagination::PagingPolicy;
use crate::workflows::directory::domain::{Listing, ListingId, ListingKind};
use crate::workflows::directory::DirectoryService;
use crate::workflows::inbox::domain::{Review, ReviewId, ReviewStatus};
use crate::workflows::inbox::repository::InboxRepository;
use crate::workflows::navigator::vocabulary::{Concern, Language, PaymentType, ServiceFormat};

pub(super) fn catalog() -> Vec<Listing> {
    let mut harbor = listing("harbor", "Harbor Counseling");
    harbor.languages.insert(Language::Spanish);

    let mut family = listing("family-services", "Family Services Agency");
    family.kind = ListingKind::Organization;
    family.issues = [Concern::Grief, Concern::Relationships].into();
    family.formats = [ServiceFormat::Group].into();
    family.payment_types = [PaymentType::Free].into();
    family.postal_code = "21201".to_string();

    let mut towson = listing("towson", "Towson Trauma Center");
    towson.postal_code = "21204".to_string();
    towson.payment_types = [PaymentType::SelfPay].into();

    let mut closed = listing("closed", "Closed Harbor Practice");
    closed.active = false;

    let mut unverified = listing("unverified", "Harbor Startup");
    unverified.verified = false;

    vec![harbor, family, towson, closed, unverified]
}

pub(super) fn build_service(
    listings: Vec<Listing>,
) -> (
    DirectoryService<MemoryDirectory, MemoryInbox>,
    Arc<MemoryInbox>,
) {
    let inbox = Arc::new(MemoryInbox::default());
    let service = DirectoryService::new(
        Arc::new(MemoryDirectory::with(listings)),
        inbox.clone(),
        PagingPolicy::default(),
    );
    (service, inbox)
}

pub(super) fn add_review(inbox: &MemoryInbox, listing_id: &str, rating: u8, status: ReviewStatus) {
    inbox
        .insert_review(Review {
            id: ReviewId::generate(),
            listing_id: ListingId(listing_id.to_string()),
            rating,
            author_name: None,
            body: "Helpful and kind.".to_string(),
            status,
            created_at: Utc::now(),
        })
        .expect("insert review");
}

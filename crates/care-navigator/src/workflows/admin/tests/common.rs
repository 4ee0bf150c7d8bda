use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

pub(super) use crate::workflows::test_support::*;

use crate::pagination::PagingPolicy;
use crate::workflows::admin::AdminService;
use crate::workflows::directory::domain::ListingId;
use crate::workflows::inbox::domain::{
    Claim, ClaimId, ClaimStatus, ContactId, ContactMessage, Review, ReviewId, ReviewStatus,
};
use crate::workflows::inbox::repository::InboxRepository;
use crate::workflows::navigator::domain::{QuestionnaireResponse, ResponseId, SessionId};
use crate::workflows::navigator::repository::ResponseRepository;
use crate::workflows::navigator::service_area::ZipCode;
use crate::workflows::navigator::vocabulary::{
    Concern, HelpFor, PaymentType, ServiceFormat, Urgency,
};
use crate::workflows::repository::RepositoryError;

pub(super) struct Fixture {
    pub(super) service: AdminService<MemoryResponses, MemoryDirectory, MemoryInbox>,
    pub(super) responses: Arc<MemoryResponses>,
    pub(super) directory: Arc<MemoryDirectory>,
    pub(super) inbox: Arc<MemoryInbox>,
}

pub(super) fn fixture() -> Fixture {
    let mut hidden = listing("hidden", "Hidden Practice");
    hidden.active = false;
    let responses = Arc::new(MemoryResponses::default());
    let directory = Arc::new(MemoryDirectory::with(vec![
        listing("harbor", "Harbor Counseling"),
        hidden,
    ]));
    let inbox = Arc::new(MemoryInbox::default());
    let service = AdminService::new(
        responses.clone(),
        directory.clone(),
        inbox.clone(),
        PagingPolicy::default(),
    );
    Fixture {
        service,
        responses,
        directory,
        inbox,
    }
}

pub(super) fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-02T15:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(super) fn store_response(
    responses: &MemoryResponses,
    minutes_after_base: i64,
    concern: Concern,
    urgency: Urgency,
) -> QuestionnaireResponse {
    responses
        .insert(QuestionnaireResponse {
            id: ResponseId::generate(),
            session_id: SessionId::generate(),
            service_area: "baltimore-metro".to_string(),
            submitted_at: base_time() + Duration::minutes(minutes_after_base),
            primary_concern: concern,
            help_for: HelpFor::SomeoneElse,
            urgency,
            service_format: [ServiceFormat::InPerson].into(),
            payment_type: PaymentType::Insurance,
            insurance_provider: Some("Aetna".to_string()),
            zip_code: ZipCode::parse("21218").expect("zip"),
            provider_gender_preference: None,
            language_preference: None,
            open_to_community_programs: false,
        })
        .expect("insert response")
}

pub(super) fn pending_claim(inbox: &MemoryInbox, listing_id: &str, user_id: &str) -> Claim {
    inbox
        .insert_claim(Claim {
            id: ClaimId::generate(),
            listing_id: ListingId(listing_id.to_string()),
            user_id: user_id.to_string(),
            name: "Dr. Rivera".to_string(),
            email: "rivera@example.org".to_string(),
            message: None,
            status: ClaimStatus::Pending,
            created_at: base_time(),
            resolved_at: None,
        })
        .expect("insert claim")
}

pub(super) fn pending_review(inbox: &MemoryInbox, listing_id: &str, rating: u8) -> Review {
    inbox
        .insert_review(Review {
            id: ReviewId::generate(),
            listing_id: ListingId(listing_id.to_string()),
            rating,
            author_name: None,
            body: "Listened carefully.".to_string(),
            status: ReviewStatus::Pending,
            created_at: base_time(),
        })
        .expect("insert review")
}

pub(super) fn stored_contact(
    inbox: &MemoryInbox,
    listing_id: &str,
    minutes_after_base: i64,
) -> ContactMessage {
    inbox
        .insert_contact(ContactMessage {
            id: ContactId::generate(),
            listing_id: ListingId(listing_id.to_string()),
            name: "Sam Ortiz".to_string(),
            email: "sam@example.org".to_string(),
            phone: None,
            message: format!("Question sent {minutes_after_base} minutes in."),
            created_at: base_time() + Duration::minutes(minutes_after_base),
        })
        .expect("insert contact")
}

/// Inbox whose claim updates fail while everything else is served from memory.
#[derive(Default, Clone)]
pub(super) struct ClaimWritesDown {
    pub(super) inner: MemoryInbox,
}

impl InboxRepository for ClaimWritesDown {
    fn insert_contact(&self, message: ContactMessage) -> Result<ContactMessage, RepositoryError> {
        self.inner.insert_contact(message)
    }

    fn contacts(
        &self,
        listing_id: Option<&ListingId>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        self.inner.contacts(listing_id)
    }

    fn insert_review(&self, review: Review) -> Result<Review, RepositoryError> {
        self.inner.insert_review(review)
    }

    fn update_review(&self, review: Review) -> Result<(), RepositoryError> {
        self.inner.update_review(review)
    }

    fn fetch_review(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        self.inner.fetch_review(id)
    }

    fn reviews(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, RepositoryError> {
        self.inner.reviews(listing_id, status)
    }

    fn insert_claim(&self, claim: Claim) -> Result<Claim, RepositoryError> {
        self.inner.insert_claim(claim)
    }

    fn update_claim(&self, _claim: Claim) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("claims table locked".to_string()))
    }

    fn fetch_claim(&self, id: &ClaimId) -> Result<Option<Claim>, RepositoryError> {
        self.inner.fetch_claim(id)
    }

    fn claims(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, RepositoryError> {
        self.inner.claims(listing_id, status)
    }
}

//! In-memory doubles shared by the workflow test modules.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::directory::domain::{Listing, ListingId, ListingKind};
use crate::workflows::directory::filter::ListingFilter;
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::inbox::domain::{
    Claim, ClaimId, ClaimStatus, ContactMessage, Notification, Review, ReviewId, ReviewStatus,
};
use crate::workflows::inbox::repository::{InboxRepository, Notifier, NotifyError};
use crate::workflows::navigator::domain::{QuestionnaireResponse, ResponseId};
use crate::workflows::navigator::repository::{ResponseFilter, ResponseRepository};
use crate::workflows::navigator::steps::StepSubmission;
use crate::workflows::navigator::vocabulary::{Concern, Language, PaymentType, ServiceFormat};
use crate::workflows::repository::RepositoryError;

pub(crate) fn listing(id: &str, name: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        kind: ListingKind::Provider,
        name: name.to_string(),
        description: format!("{name} offers individual and family therapy."),
        issues: BTreeSet::from([Concern::Trauma, Concern::Anxiety]),
        formats: BTreeSet::from([ServiceFormat::Video, ServiceFormat::InPerson]),
        payment_types: BTreeSet::from([PaymentType::Insurance, PaymentType::SlidingScale]),
        languages: BTreeSet::from([Language::English]),
        postal_code: "21231".to_string(),
        phone: Some("410-555-0100".to_string()),
        email: Some(format!("{id}@example.org")),
        website: None,
        active: true,
        verified: true,
        claimed_by: None,
        created_at: Utc::now(),
    }
}

/// Answers for all seven steps: trauma, self, soon, video, insurance, 21231.
pub(crate) fn valid_steps() -> Vec<StepSubmission> {
    vec![
        StepSubmission::Concern {
            primary_concern: Some("trauma".to_string()),
        },
        StepSubmission::Recipient {
            help_for: Some("self".to_string()),
        },
        StepSubmission::Urgency {
            urgency: Some("soon".to_string()),
        },
        StepSubmission::Format {
            service_format: Some(vec!["video".to_string()]),
        },
        StepSubmission::Payment {
            payment_type: Some("insurance".to_string()),
            insurance_provider: Some("CareFirst".to_string()),
        },
        StepSubmission::Location {
            zip_code: Some("21231".to_string()),
        },
        StepSubmission::Preferences {
            provider_gender_preference: None,
            language_preference: Some("english".to_string()),
            open_to_community_programs: Some(true),
        },
    ]
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(crate) struct MemoryResponses {
    records: Arc<Mutex<Vec<QuestionnaireResponse>>>,
}

impl MemoryResponses {
    pub(crate) fn stored(&self) -> Vec<QuestionnaireResponse> {
        self.records.lock().expect("response mutex poisoned").clone()
    }
}

impl ResponseRepository for MemoryResponses {
    fn insert(
        &self,
        response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        let mut guard = self.records.lock().expect("response mutex poisoned");
        if guard.iter().any(|existing| existing.id == response.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(response.clone());
        Ok(response)
    }

    fn fetch(&self, id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError> {
        let guard = self.records.lock().expect("response mutex poisoned");
        Ok(guard.iter().find(|response| &response.id == id).cloned())
    }

    fn list(&self, filter: &ResponseFilter) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        let guard = self.records.lock().expect("response mutex poisoned");
        Ok(guard
            .iter()
            .filter(|response| filter.matches(response))
            .cloned()
            .collect())
    }
}

pub(crate) struct UnavailableResponses;

impl ResponseRepository for UnavailableResponses {
    fn insert(
        &self,
        _response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(
        &self,
        _filter: &ResponseFilter,
    ) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Fails the first `outages` inserts, then stores normally.
#[derive(Default)]
pub(crate) struct FlakyResponses {
    outages: Mutex<usize>,
    inner: MemoryResponses,
}

impl FlakyResponses {
    pub(crate) fn failing(outages: usize) -> Self {
        Self {
            outages: Mutex::new(outages),
            inner: MemoryResponses::default(),
        }
    }

    pub(crate) fn stored(&self) -> Vec<QuestionnaireResponse> {
        self.inner.stored()
    }
}

impl ResponseRepository for FlakyResponses {
    fn insert(
        &self,
        response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        let mut outages = self.outages.lock().expect("outage mutex poisoned");
        if *outages > 0 {
            *outages -= 1;
            return Err(RepositoryError::Unavailable("connection reset".to_string()));
        }
        drop(outages);
        self.inner.insert(response)
    }

    fn fetch(&self, id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self, filter: &ResponseFilter) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        self.inner.list(filter)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryDirectory {
    listings: Arc<Mutex<Vec<Listing>>>,
}

impl MemoryDirectory {
    pub(crate) fn with(listings: Vec<Listing>) -> Self {
        Self {
            listings: Arc::new(Mutex::new(listings)),
        }
    }
}

impl DirectoryRepository for MemoryDirectory {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError> {
        let mut guard = self.listings.lock().expect("directory mutex poisoned");
        if guard.iter().any(|existing| existing.id == listing.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), RepositoryError> {
        let mut guard = self.listings.lock().expect("directory mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == listing.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = listing;
        Ok(())
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.listings.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|listing| &listing.id == id).cloned())
    }

    fn query(&self, filter: &ListingFilter) -> Result<Vec<Listing>, RepositoryError> {
        let guard = self.listings.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }
}

pub(crate) struct UnavailableDirectory;

impl DirectoryRepository for UnavailableDirectory {
    fn insert(&self, _listing: Listing) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }

    fn update(&self, _listing: Listing) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }

    fn query(&self, _filter: &ListingFilter) -> Result<Vec<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryInbox {
    contacts: Arc<Mutex<Vec<ContactMessage>>>,
    reviews: Arc<Mutex<Vec<Review>>>,
    claims: Arc<Mutex<Vec<Claim>>>,
}

impl InboxRepository for MemoryInbox {
    fn insert_contact(&self, message: ContactMessage) -> Result<ContactMessage, RepositoryError> {
        let mut guard = self.contacts.lock().expect("inbox mutex poisoned");
        guard.push(message.clone());
        Ok(message)
    }

    fn contacts(
        &self,
        listing_id: Option<&ListingId>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        let guard = self.contacts.lock().expect("inbox mutex poisoned");
        Ok(guard
            .iter()
            .filter(|message| listing_id.map_or(true, |id| &message.listing_id == id))
            .cloned()
            .collect())
    }

    fn insert_review(&self, review: Review) -> Result<Review, RepositoryError> {
        let mut guard = self.reviews.lock().expect("inbox mutex poisoned");
        guard.push(review.clone());
        Ok(review)
    }

    fn update_review(&self, review: Review) -> Result<(), RepositoryError> {
        let mut guard = self.reviews.lock().expect("inbox mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == review.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = review;
        Ok(())
    }

    fn fetch_review(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let guard = self.reviews.lock().expect("inbox mutex poisoned");
        Ok(guard.iter().find(|review| &review.id == id).cloned())
    }

    fn reviews(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let guard = self.reviews.lock().expect("inbox mutex poisoned");
        Ok(guard
            .iter()
            .filter(|review| listing_id.map_or(true, |id| &review.listing_id == id))
            .filter(|review| status.map_or(true, |status| review.status == status))
            .cloned()
            .collect())
    }

    fn insert_claim(&self, claim: Claim) -> Result<Claim, RepositoryError> {
        let mut guard = self.claims.lock().expect("inbox mutex poisoned");
        guard.push(claim.clone());
        Ok(claim)
    }

    fn update_claim(&self, claim: Claim) -> Result<(), RepositoryError> {
        let mut guard = self.claims.lock().expect("inbox mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == claim.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = claim;
        Ok(())
    }

    fn fetch_claim(&self, id: &ClaimId) -> Result<Option<Claim>, RepositoryError> {
        let guard = self.claims.lock().expect("inbox mutex poisoned");
        Ok(guard.iter().find(|claim| &claim.id == id).cloned())
    }

    fn claims(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, RepositoryError> {
        let guard = self.claims.lock().expect("inbox mutex poisoned");
        Ok(guard
            .iter()
            .filter(|claim| listing_id.map_or(true, |id| &claim.listing_id == id))
            .filter(|claim| status.map_or(true, |status| claim.status == status))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub(crate) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(crate) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay refused connection".to_string()))
    }
}

use care_navigator::config::NavigatorConfig;
use care_navigator::pagination::PagingPolicy;
use care_navigator::workflows::admin::AdminService;
use care_navigator::workflows::directory::{
    DirectoryRepository, DirectoryService, Listing, ListingFilter, ListingId,
};
use care_navigator::workflows::inbox::{
    Claim, ClaimId, ClaimStatus, ContactMessage, InboxRepository, InboxService, Notification,
    Notifier, NotifyError, Review, ReviewId, ReviewStatus,
};
use care_navigator::workflows::navigator::{
    NavigatorService, QuestionnaireResponse, ResponseFilter, ResponseId, ResponseRepository,
    ServiceAreaCatalog,
};
use care_navigator::workflows::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Navigator = NavigatorService<InMemoryResponseRepository, InMemoryDirectory>;
pub(crate) type Directory = DirectoryService<InMemoryDirectory, InMemoryInbox>;
pub(crate) type Inbox = InboxService<InMemoryDirectory, InMemoryInbox, LoggingNotifier>;
pub(crate) type Admin = AdminService<InMemoryResponseRepository, InMemoryDirectory, InMemoryInbox>;

/// Every workflow service wired to one set of in-memory stores.
#[derive(Clone)]
pub(crate) struct AppServices {
    pub(crate) directory_store: Arc<InMemoryDirectory>,
    pub(crate) navigator: Arc<Navigator>,
    pub(crate) directory: Arc<Directory>,
    pub(crate) inbox: Arc<Inbox>,
    pub(crate) admin: Arc<Admin>,
}

impl AppServices {
    pub(crate) fn in_memory(config: &NavigatorConfig) -> Self {
        let responses = Arc::new(InMemoryResponseRepository::default());
        let directory_store = Arc::new(InMemoryDirectory::default());
        let inbox_store = Arc::new(InMemoryInbox::default());
        let paging = PagingPolicy::from(config);

        let navigator = Arc::new(NavigatorService::new(
            responses.clone(),
            directory_store.clone(),
            ServiceAreaCatalog::standard(),
            config,
        ));
        let directory = Arc::new(DirectoryService::new(
            directory_store.clone(),
            inbox_store.clone(),
            paging,
        ));
        let inbox = Arc::new(InboxService::new(
            directory_store.clone(),
            inbox_store.clone(),
            Arc::new(LoggingNotifier),
            paging,
        ));
        let admin = Arc::new(AdminService::new(
            responses,
            directory_store.clone(),
            inbox_store,
            paging,
        ));

        Self {
            directory_store,
            navigator,
            directory,
            inbox,
            admin,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

/// Append-only response store kept in submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResponseRepository {
    records: Arc<Mutex<Vec<QuestionnaireResponse>>>,
}

impl ResponseRepository for InMemoryResponseRepository {
    fn insert(
        &self,
        response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.iter().any(|existing| existing.id == response.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(response.clone());
        Ok(response)
    }

    fn fetch(&self, id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard.iter().find(|response| &response.id == id).cloned())
    }

    fn list(&self, filter: &ResponseFilter) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .iter()
            .filter(|response| filter.matches(response))
            .cloned()
            .collect())
    }
}

/// Directory store evaluating typed filters in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDirectory {
    listings: Arc<Mutex<Vec<Listing>>>,
}

impl InMemoryDirectory {
    pub(crate) fn seed(&self, listings: Vec<Listing>) -> Result<usize, RepositoryError> {
        let count = listings.len();
        for listing in listings {
            self.insert(listing)?;
        }
        Ok(count)
    }
}

impl DirectoryRepository for InMemoryDirectory {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError> {
        let mut guard = lock(&self.listings)?;
        if guard.iter().any(|existing| existing.id == listing.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.listings)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == listing.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = listing;
        Ok(())
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = lock(&self.listings)?;
        Ok(guard.iter().find(|listing| &listing.id == id).cloned())
    }

    fn query(&self, filter: &ListingFilter) -> Result<Vec<Listing>, RepositoryError> {
        let guard = lock(&self.listings)?;
        Ok(guard
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInbox {
    contacts: Arc<Mutex<Vec<ContactMessage>>>,
    reviews: Arc<Mutex<Vec<Review>>>,
    claims: Arc<Mutex<Vec<Claim>>>,
}

fn for_listing(candidate: &ListingId, wanted: Option<&ListingId>) -> bool {
    wanted.map_or(true, |wanted| candidate == wanted)
}

impl InboxRepository for InMemoryInbox {
    fn insert_contact(&self, message: ContactMessage) -> Result<ContactMessage, RepositoryError> {
        lock(&self.contacts)?.push(message.clone());
        Ok(message)
    }

    fn contacts(
        &self,
        listing_id: Option<&ListingId>,
    ) -> Result<Vec<ContactMessage>, RepositoryError> {
        let guard = lock(&self.contacts)?;
        Ok(guard
            .iter()
            .filter(|message| for_listing(&message.listing_id, listing_id))
            .cloned()
            .collect())
    }

    fn insert_review(&self, review: Review) -> Result<Review, RepositoryError> {
        lock(&self.reviews)?.push(review.clone());
        Ok(review)
    }

    fn update_review(&self, review: Review) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.reviews)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == review.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = review;
        Ok(())
    }

    fn fetch_review(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let guard = lock(&self.reviews)?;
        Ok(guard.iter().find(|review| &review.id == id).cloned())
    }

    fn reviews(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let guard = lock(&self.reviews)?;
        Ok(guard
            .iter()
            .filter(|review| for_listing(&review.listing_id, listing_id))
            .filter(|review| status.map_or(true, |status| review.status == status))
            .cloned()
            .collect())
    }

    fn insert_claim(&self, claim: Claim) -> Result<Claim, RepositoryError> {
        lock(&self.claims)?.push(claim.clone());
        Ok(claim)
    }

    fn update_claim(&self, claim: Claim) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.claims)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == claim.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = claim;
        Ok(())
    }

    fn fetch_claim(&self, id: &ClaimId) -> Result<Option<Claim>, RepositoryError> {
        let guard = lock(&self.claims)?;
        Ok(guard.iter().find(|claim| &claim.id == id).cloned())
    }

    fn claims(
        &self,
        listing_id: Option<&ListingId>,
        status: Option<ClaimStatus>,
    ) -> Result<Vec<Claim>, RepositoryError> {
        let guard = lock(&self.claims)?;
        Ok(guard
            .iter()
            .filter(|claim| for_listing(&claim.listing_id, listing_id))
            .filter(|claim| status.map_or(true, |status| claim.status == status))
            .cloned()
            .collect())
    }
}

/// Stands in for the mail relay: every notification becomes a log event.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            template = %notification.template,
            listing_id = %notification.listing_id,
            has_recipient = notification.recipient.is_some(),
            "notification queued"
        );
        Ok(())
    }
}

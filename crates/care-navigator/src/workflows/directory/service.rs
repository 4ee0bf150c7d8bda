use std::sync::Arc;

use serde::Deserialize;

use super::domain::{ListingId, ListingKind, ListingProfile, ListingSummary, ReviewSummary};
use super::filter::{ListingFilter, ListingPredicate};
use super::repository::DirectoryRepository;
use crate::error::ErrorKind;
use crate::pagination::{Page, PageRequest, PagingPolicy};
use crate::workflows::inbox::domain::ReviewStatus;
use crate::workflows::inbox::repository::InboxRepository;
use crate::workflows::navigator::validation::FieldErrors;
use crate::workflows::navigator::vocabulary::{
    Concern, Language, PaymentType, ServiceFormat, Vocabulary,
};
use crate::workflows::repository::RepositoryError;

/// Public directory search parameters, as received in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub concern: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Full ZIP code or a leading prefix of at least three digits.
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl DirectoryQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(0))
    }

    /// Listed entries narrowed by every supplied parameter.
    pub fn to_filter(&self) -> Result<ListingFilter, FieldErrors> {
        let mut errors = FieldErrors::new();

        let kind = non_blank(&self.kind).and_then(|raw| {
            let kind = ListingKind::parse(raw);
            if kind.is_none() {
                errors.insert("kind", "kind must be provider or organization");
            }
            kind
        });
        let concern = term::<Concern>("concern", &self.concern, &mut errors);
        let format = term::<ServiceFormat>("format", &self.format, &mut errors);
        let payment = term::<PaymentType>("payment", &self.payment, &mut errors);
        let language = term::<Language>("language", &self.language, &mut errors);
        let zip = non_blank(&self.zip).and_then(|raw| {
            let valid = (3..=5).contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_digit());
            if !valid {
                errors.insert("zip", "zip must be 3 to 5 digits");
            }
            valid.then(|| raw.to_string())
        });
        let text = non_blank(&self.q).map(str::to_string);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ListingFilter::listed()
            .and_if(kind.map(ListingPredicate::Kind))
            .and_if(concern.map(|concern| ListingPredicate::IssuesAny([concern].into())))
            .and_if(format.map(|format| ListingPredicate::FormatsAny([format].into())))
            .and_if(payment.map(ListingPredicate::AcceptsPayment))
            .and_if(language.map(ListingPredicate::SpeaksLanguage))
            .and_if(zip.map(ListingPredicate::PostalPrefix))
            .and_if(text.map(ListingPredicate::NameContains)))
    }
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn term<T: Vocabulary>(field: &str, raw: &Option<String>, errors: &mut FieldErrors) -> Option<T> {
    let value = non_blank(raw)?;
    let parsed = T::parse(value);
    if parsed.is_none() {
        errors.insert(
            field,
            format!("expected one of: {}", T::accepted_terms()),
        );
    }
    parsed
}

/// Public directory: search and profile pages.
pub struct DirectoryService<D, I> {
    directory: Arc<D>,
    inbox: Arc<I>,
    paging: PagingPolicy,
}

impl<D, I> DirectoryService<D, I>
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
{
    pub fn new(directory: Arc<D>, inbox: Arc<I>, paging: PagingPolicy) -> Self {
        Self {
            directory,
            inbox,
            paging,
        }
    }

    pub fn search(
        &self,
        query: &DirectoryQuery,
    ) -> Result<Page<ListingSummary>, DirectoryServiceError> {
        let filter = query.to_filter().map_err(DirectoryServiceError::Validation)?;
        let listings = self.directory.query(&filter)?;
        let summaries = listings.iter().map(|listing| listing.summary()).collect();
        Ok(self.paging.paginate(summaries, query.page_request()))
    }

    pub fn profile(&self, id: &ListingId) -> Result<ListingProfile, DirectoryServiceError> {
        let listing = self
            .directory
            .fetch(id)?
            .filter(|listing| listing.is_listed())
            .ok_or_else(|| DirectoryServiceError::NotFound(id.clone()))?;
        let published = self
            .inbox
            .reviews(Some(&listing.id), Some(ReviewStatus::Published))?;

        Ok(ListingProfile {
            listing: listing.summary(),
            description: listing.description.clone(),
            claimed: listing.claimed_by.is_some(),
            reviews: ReviewSummary::from_ratings(published.iter().map(|review| review.rating)),
        })
    }
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error("search parameters are invalid: {0}")]
    Validation(FieldErrors),
    #[error("listing {0} not found")]
    NotFound(ListingId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DirectoryServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryServiceError::Validation(_) => ErrorKind::Validation,
            DirectoryServiceError::NotFound(_) => ErrorKind::NotFound,
            DirectoryServiceError::Repository(err) => err.kind(),
        }
    }
}
